//! i18n runtime: dictionary cache, active locale and lookups.

pub mod global;
mod handle;

use std::collections::HashMap;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use futures::future::try_join_all;
use thiserror::Error;
use tokio::sync::{
    Mutex,
    watch,
};

pub use handle::LocaleHandle;

use crate::dictionary::Dictionary;
use crate::loader::LoadError;
use crate::registry::LocaleRegistry;
use crate::types::{
    I18nConfig,
    LocaleTag,
};

/// Errors reported by the i18n runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A dictionary on the fallback chain failed to load.
    #[error("Failed to load dictionary for locale '{locale}': {source}")]
    Load {
        /// Locale whose dictionary failed.
        locale: LocaleTag,
        /// Underlying loader error.
        #[source]
        source: LoadError,
    },

    /// The process-wide runtime is already installed.
    #[error("The i18n runtime has already been initialized")]
    AlreadyInitialized,
}

/// The i18n runtime.
///
/// Clones share state. Dictionaries are loaded lazily the first time a locale
/// on their fallback chain is activated, then cached for the runtime's lifetime.
#[derive(Clone)]
pub struct I18nRuntime {
    /// Shared state.
    inner: Arc<RuntimeInner>,
}

/// State shared between runtime clones and locale handles.
struct RuntimeInner {
    /// Registered loaders.
    registry: LocaleRegistry,
    /// Last resort of every fallback chain.
    fallback_locale: LocaleTag,
    /// Loaded dictionaries.
    dictionaries: RwLock<HashMap<LocaleTag, Arc<Dictionary>>>,
    /// Serializes loading so a tag is never loaded twice.
    load_gate: Mutex<()>,
    /// Active locale, `None` until the first activation.
    locale_tx: watch::Sender<Option<LocaleTag>>,
    /// Whether dictionaries are being loaded.
    loading_tx: watch::Sender<bool>,
}

impl I18nRuntime {
    /// Initializes the runtime and activates `config.initial_locale`.
    ///
    /// A dictionary that fails to load is logged; the initial locale is published
    /// anyway and lookups degrade along its fallback chain.
    pub async fn init(registry: LocaleRegistry, config: I18nConfig) -> Self {
        tracing::debug!(
            fallback = %config.fallback_locale,
            initial = %config.initial_locale,
            locales = ?registry.locales(),
            "Initializing i18n runtime"
        );
        let (locale_tx, _) = watch::channel(None);
        let (loading_tx, _) = watch::channel(false);
        let runtime = Self {
            inner: Arc::new(RuntimeInner {
                registry,
                fallback_locale: config.fallback_locale,
                dictionaries: RwLock::new(HashMap::new()),
                load_gate: Mutex::new(()),
                locale_tx,
                loading_tx,
            }),
        };

        if let Err(e) = runtime.ensure_loaded(&config.initial_locale).await {
            tracing::warn!("{e}");
        }
        runtime.publish(config.initial_locale);
        runtime
    }

    #[must_use]
    pub fn fallback_locale(&self) -> &LocaleTag {
        &self.inner.fallback_locale
    }

    #[must_use]
    pub fn registry(&self) -> &LocaleRegistry {
        &self.inner.registry
    }

    /// Reactive handle on the active locale.
    #[must_use]
    pub fn locale(&self) -> LocaleHandle {
        LocaleHandle::new(self.clone(), self.inner.locale_tx.subscribe())
    }

    #[must_use]
    pub fn current_locale(&self) -> Option<LocaleTag> {
        self.inner.locale_tx.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.inner.loading_tx.borrow()
    }

    /// Subscribes to the loading flag.
    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.inner.loading_tx.subscribe()
    }

    /// Whether a dictionary for `tag` has been loaded.
    #[must_use]
    pub fn is_cached(&self, tag: &str) -> bool {
        self.read_dictionaries().contains_key(tag)
    }

    /// Loads `tag`'s dictionaries and makes it the active locale.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Load`] if a dictionary on the fallback chain fails
    /// to load. The active locale is left unchanged in that case.
    pub async fn set_locale(&self, tag: impl Into<LocaleTag>) -> Result<(), RuntimeError> {
        let tag = tag.into();
        self.ensure_loaded(&tag).await?;
        self.publish(tag);
        Ok(())
    }

    /// Loads every registered, not yet cached dictionary on `tag`'s fallback chain.
    ///
    /// # Errors
    /// Returns the first load failure.
    pub async fn ensure_loaded(&self, tag: &LocaleTag) -> Result<(), RuntimeError> {
        let _gate = self.inner.load_gate.lock().await;
        let pending = tag.fallback_chain(&self.inner.fallback_locale).iter().any(|locale| {
            !self.is_cached(locale.as_str())
                && !self.inner.registry.loaders(locale.as_str()).is_empty()
        });
        if !pending {
            tracing::debug!(locale = %tag, "Dictionary cache hit");
            return Ok(());
        }

        self.inner.loading_tx.send_replace(true);
        let result = self.load_chain(tag).await;
        self.inner.loading_tx.send_replace(false);
        result
    }

    /// Loads the chain. Callers hold the load gate.
    ///
    /// A failing locale does not stop the rest of the chain from loading.
    async fn load_chain(&self, tag: &LocaleTag) -> Result<(), RuntimeError> {
        let mut first_error = None;
        for locale in tag.fallback_chain(&self.inner.fallback_locale) {
            if self.is_cached(locale.as_str()) {
                continue;
            }
            let loaders = self.inner.registry.loaders(locale.as_str());
            if loaders.is_empty() {
                continue;
            }

            tracing::debug!(%locale, loaders = loaders.len(), "Loading dictionary");
            match try_join_all(loaders.iter().map(|loader| loader.load())).await {
                Ok(parts) => {
                    let mut dictionary = Dictionary::default();
                    for part in parts {
                        dictionary.merge(part);
                    }
                    self.write_dictionaries().insert(locale, Arc::new(dictionary));
                }
                Err(source) => {
                    if first_error.is_none() {
                        first_error = Some(RuntimeError::Load { locale, source });
                    }
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Returns the translation of `key` for the active locale.
    ///
    /// Walks the active locale's fallback chain and returns the first hit, or
    /// `key` itself when nothing matches.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        let Some(locale) = self.current_locale() else {
            return key.to_string();
        };
        let dictionaries = self.read_dictionaries();
        for candidate in locale.fallback_chain(&self.inner.fallback_locale) {
            if let Some(value) = dictionaries.get(&candidate).and_then(|dict| dict.get(key)) {
                return value.to_string();
            }
        }
        tracing::debug!(%locale, key, "Missing translation");
        key.to_string()
    }

    /// Sets the active locale. Subscribers are only notified on an actual change.
    fn publish(&self, tag: LocaleTag) {
        self.inner.locale_tx.send_if_modified(|current| {
            if current.as_ref() == Some(&tag) {
                return false;
            }
            tracing::info!(locale = %tag, "Active locale changed");
            *current = Some(tag);
            true
        });
    }

    /// Read access to the dictionary cache.
    fn read_dictionaries(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<LocaleTag, Arc<Dictionary>>> {
        self.inner.dictionaries.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the dictionary cache.
    fn write_dictionaries(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<LocaleTag, Arc<Dictionary>>> {
        self.inner.dictionaries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for I18nRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18nRuntime")
            .field("fallback_locale", &self.inner.fallback_locale)
            .field("current_locale", &self.current_locale())
            .field("registry", &self.inner.registry)
            .finish_non_exhaustive()
    }
}
