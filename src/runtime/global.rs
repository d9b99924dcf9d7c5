//! Process-wide runtime instance.
//!
//! An application installs exactly one runtime at startup. From then on any
//! part of it can reach the runtime, or its locale handle, without threading
//! it through every call. The instance is never torn down; it lives until the
//! process exits. Code that needs isolated runtimes (tests, multi-tenant
//! servers) should pass [`I18nRuntime`] values explicitly instead.

use std::sync::OnceLock;

use super::{
    I18nRuntime,
    LocaleHandle,
    RuntimeError,
};

/// The installed runtime.
static RUNTIME: OnceLock<I18nRuntime> = OnceLock::new();

/// Installs `runtime` as the process-wide instance and returns its locale handle.
///
/// # Errors
/// Returns [`RuntimeError::AlreadyInitialized`] if a runtime was installed before.
pub fn install(runtime: I18nRuntime) -> Result<LocaleHandle, RuntimeError> {
    let handle = runtime.locale();
    RUNTIME.set(runtime).map_err(|_| RuntimeError::AlreadyInitialized)?;
    tracing::debug!("Installed process-wide i18n runtime");
    Ok(handle)
}

/// The installed runtime, if any.
#[must_use]
pub fn runtime() -> Option<&'static I18nRuntime> {
    RUNTIME.get()
}

/// Locale handle of the installed runtime, if any.
#[must_use]
pub fn locale() -> Option<LocaleHandle> {
    RUNTIME.get().map(I18nRuntime::locale)
}

/// Translates `key` with the installed runtime; `key` itself before installation.
#[must_use]
pub fn translate(key: &str) -> String {
    RUNTIME.get().map_or_else(|| key.to_string(), |runtime| runtime.translate(key))
}

