//! Locale registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::loader::DictionaryLoader;
use crate::types::LocaleTag;

/// Registered locales and the loaders producing their dictionaries.
///
/// Registering a tag twice queues a second loader. Both run when the locale is
/// first activated and their dictionaries are merged in registration order.
#[derive(Clone, Default)]
pub struct LocaleRegistry {
    /// Loaders per locale, in registration order.
    loaders: HashMap<LocaleTag, Vec<Arc<dyn DictionaryLoader>>>,
}

impl LocaleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `loader` for `tag` without invoking it.
    pub fn register(&mut self, tag: impl Into<LocaleTag>, loader: impl DictionaryLoader + 'static) {
        let tag = tag.into();
        tracing::debug!(locale = %tag, "Registering dictionary loader");
        self.loaders.entry(tag).or_default().push(Arc::new(loader));
    }

    #[must_use]
    pub fn is_registered(&self, tag: &str) -> bool {
        self.loaders.contains_key(tag)
    }

    /// Registered tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&LocaleTag> {
        let mut locales: Vec<_> = self.loaders.keys().collect();
        locales.sort();
        locales
    }

    /// Loaders queued for `tag`, empty if the tag is unknown.
    #[must_use]
    pub fn loaders(&self, tag: &str) -> &[Arc<dyn DictionaryLoader>] {
        self.loaders.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl fmt::Debug for LocaleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.loaders.iter().map(|(tag, loaders)| (tag, loaders.len())))
            .finish()
    }
}
