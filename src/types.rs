//! Shared locale types.

use std::borrow::Borrow;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Locale used when nothing else is known, and the fallback of every lookup.
pub const DEFAULT_LOCALE: &str = "en";

/// Key under which the user's locale preference is persisted.
pub const LOCALE_STORAGE_KEY: &str = "locale";

/// Locales shipped with the crate.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "th"];

/// Locale identifier such as `en` or `th-TH`.
///
/// The tag is kept verbatim. A value read back from storage may name a locale
/// that was never registered; resolution falls back instead of rejecting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the locales to consult for this tag, most specific first.
    ///
    /// `th-TH` yields `th-TH`, `th` and then `fallback`. Duplicates are dropped.
    ///
    /// # Examples
    /// ```
    /// use i18n_bootstrap::types::LocaleTag;
    ///
    /// let chain = LocaleTag::new("th-TH").fallback_chain(&LocaleTag::new("en"));
    /// let chain: Vec<&str> = chain.iter().map(LocaleTag::as_str).collect();
    /// assert_eq!(chain, ["th-TH", "th", "en"]);
    /// ```
    #[must_use]
    pub fn fallback_chain(&self, fallback: &Self) -> Vec<Self> {
        let mut chain = Vec::new();
        let mut current = self.0.as_str();
        loop {
            chain.push(Self::new(current));
            match current.rsplit_once('-') {
                Some((head, _)) if !head.is_empty() => current = head,
                _ => break,
            }
        }
        if !chain.contains(fallback) {
            chain.push(fallback.clone());
        }
        chain
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LocaleTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl Borrow<str> for LocaleTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Configuration handed to the runtime initializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nConfig {
    pub fallback_locale: LocaleTag,
    pub initial_locale: LocaleTag,
}
