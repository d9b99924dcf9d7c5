//! Reactive handle on the active locale.

use tokio::sync::watch;

use super::{
    I18nRuntime,
    RuntimeError,
};
use crate::types::LocaleTag;

/// Reads, observes and switches the active locale.
///
/// Handles are cheap to clone; every handle observes the same runtime.
#[derive(Debug, Clone)]
pub struct LocaleHandle {
    /// Runtime performing switches.
    runtime: I18nRuntime,
    /// Locale change notifications.
    receiver: watch::Receiver<Option<LocaleTag>>,
}

impl LocaleHandle {
    pub(super) const fn new(
        runtime: I18nRuntime,
        receiver: watch::Receiver<Option<LocaleTag>>,
    ) -> Self {
        Self { runtime, receiver }
    }

    /// Active locale, `None` before the runtime has activated one.
    #[must_use]
    pub fn get(&self) -> Option<LocaleTag> {
        self.receiver.borrow().clone()
    }

    /// New receiver notified on every locale change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<LocaleTag>> {
        self.receiver.clone()
    }

    /// Waits for the next locale change and returns the new locale.
    ///
    /// Returns `None` once the runtime has been dropped.
    pub async fn changed(&mut self) -> Option<LocaleTag> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }

    /// Requests a locale switch.
    ///
    /// # Errors
    /// See [`I18nRuntime::set_locale`].
    pub async fn set(&self, tag: impl Into<LocaleTag>) -> Result<(), RuntimeError> {
        self.runtime.set_locale(tag).await
    }

    #[must_use]
    pub const fn runtime(&self) -> &I18nRuntime {
        &self.runtime
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::LocaleRegistry;
    use crate::test_utils::CountingLoader;
    use crate::types::I18nConfig;

    async fn runtime() -> I18nRuntime {
        let mut registry = LocaleRegistry::new();
        registry.register("en", CountingLoader::new(&[("hello", "Hello")]));
        registry.register("th", CountingLoader::new(&[("hello", "สวัสดี")]));
        I18nRuntime::init(
            registry,
            I18nConfig { fallback_locale: "en".into(), initial_locale: "en".into() },
        )
        .await
    }

    #[tokio::test]
    async fn handle_reads_current_locale() {
        let handle = runtime().await.locale();

        assert_eq!(handle.get(), Some("en".into()));
    }

    #[tokio::test]
    async fn set_through_handle_is_seen_by_other_handles() {
        let runtime = runtime().await;
        let writer = runtime.locale();
        let reader = runtime.locale();

        writer.set("th").await.unwrap();

        assert_eq!(reader.get(), Some("th".into()));
        assert_eq!(runtime.translate("hello"), "สวัสดี");
    }

    #[tokio::test]
    async fn subscribers_are_notified() {
        let runtime = runtime().await;
        let mut handle = runtime.locale();
        let mut receiver = handle.subscribe();

        let switcher = runtime.clone();
        let task = tokio::spawn(async move { switcher.set_locale("th").await });

        assert_eq!(handle.changed().await, Some("th".into()));
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), Some("th".into()));
        task.await.unwrap().unwrap();
    }
}
