//! Locale bootstrapping.
//!
//! Registers the locale dictionaries, works out which locale to start with and
//! initializes the i18n runtime.
//!
//! The initial locale is the persisted preference when running as an
//! interactive client, and the default locale otherwise. The stored value is
//! used verbatim; an unknown tag is left to the runtime's fallback chain.

use std::path::Path;

use crate::config::{
    ConfigError,
    I18nSettings,
    load_settings,
};
use crate::environment::Environment;
use crate::loader::{
    EmbeddedLoader,
    JsonFileLoader,
};
use crate::registry::LocaleRegistry;
use crate::runtime::{
    I18nRuntime,
    LocaleHandle,
    RuntimeError,
    global,
};
use crate::types::{
    I18nConfig,
    LocaleTag,
};

/// English dictionary bundled into the binary.
const EN_DICTIONARY: &str = include_str!("../locales/en.json");
/// Thai dictionary bundled into the binary.
const TH_DICTIONARY: &str = include_str!("../locales/th.json");

/// Returns the dictionary bundled for `tag`, if any.
#[must_use]
pub fn bundled_dictionary(tag: &str) -> Option<&'static str> {
    match tag {
        "en" => Some(EN_DICTIONARY),
        "th" => Some(TH_DICTIONARY),
        _ => None,
    }
}

/// Sets up the i18n runtime at application startup.
#[derive(Debug, Clone, Default)]
pub struct LocaleBootstrapper {
    /// Validated settings.
    settings: I18nSettings,
}

impl LocaleBootstrapper {
    #[must_use]
    pub const fn new(settings: I18nSettings) -> Self {
        Self { settings }
    }

    /// Creates a bootstrapper from the project's `.i18n-bootstrap.json`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the settings file is unreadable or invalid.
    pub fn from_project(project_root: &Path) -> Result<Self, ConfigError> {
        load_settings(project_root).map(Self::new)
    }

    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }

    #[must_use]
    pub fn default_locale(&self) -> LocaleTag {
        LocaleTag::new(self.settings.default_locale.as_str())
    }

    /// Registers a lazy loader for every configured locale.
    ///
    /// Loaders read `<localesDir>/<tag>.json` when `localesDir` is set and the
    /// bundled dictionaries otherwise. None of them runs here.
    #[must_use]
    pub fn register_locales(&self) -> LocaleRegistry {
        let mut registry = LocaleRegistry::new();
        for locale in &self.settings.locales {
            if let Some(dir) = &self.settings.locales_dir {
                let path = dir.join(format!("{locale}.json"));
                registry.register(locale.as_str(), JsonFileLoader::new(path));
            } else if let Some(source) = bundled_dictionary(locale) {
                registry.register(locale.as_str(), EmbeddedLoader::new(source));
            } else {
                tracing::warn!(%locale, "No bundled dictionary, locale not registered");
            }
        }
        registry
    }

    /// Computes the locale to start with.
    ///
    /// Storage is only consulted in a browser environment. A missing preference
    /// or a failing read yields the default locale.
    pub fn resolve_initial_locale(&self, env: &dyn Environment) -> LocaleTag {
        if !env.is_browser() {
            return self.default_locale();
        }

        match env.read_preference(&self.settings.storage_key) {
            Ok(Some(stored)) => {
                tracing::debug!(locale = %stored, "Using persisted locale preference");
                LocaleTag::new(stored)
            }
            Ok(None) => self.default_locale(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable locale preference: {e}");
                self.default_locale()
            }
        }
    }

    /// Builds the runtime configuration for `env`.
    pub fn config(&self, env: &dyn Environment) -> I18nConfig {
        I18nConfig {
            fallback_locale: self.default_locale(),
            initial_locale: self.resolve_initial_locale(env),
        }
    }

    /// Registers the locales and initializes a runtime owned by the caller.
    pub async fn bootstrap(&self, env: &dyn Environment) -> I18nRuntime {
        let registry = self.register_locales();
        let config = self.config(env);
        I18nRuntime::init(registry, config).await
    }

    /// Bootstraps and installs the process-wide runtime.
    ///
    /// # Errors
    /// Returns [`RuntimeError::AlreadyInitialized`] if a runtime is already installed.
    pub async fn bootstrap_global(
        &self,
        env: &dyn Environment,
    ) -> Result<LocaleHandle, RuntimeError> {
        if global::runtime().is_some() {
            return Err(RuntimeError::AlreadyInitialized);
        }
        global::install(self.bootstrap(env).await)
    }
}
