use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::bootstrap::bundled_dictionary;
use crate::types::{
    DEFAULT_LOCALE,
    LOCALE_STORAGE_KEY,
    SUPPORTED_LOCALES,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Initial locale when no preference is stored, and the fallback locale.
    pub default_locale: String,

    /// Storage key of the persisted locale preference.
    pub storage_key: String,

    /// Locales to register.
    pub locales: Vec<String>,

    /// Directory holding `<locale>.json` dictionaries.
    /// If unset, the dictionaries bundled into the binary are used.
    pub locales_dir: Option<PathBuf>,

    /// JSON file persisting client preferences.
    /// If unset, the process runs as a headless environment.
    pub preferences_file: Option<PathBuf>,
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Duplicate locale
    /// - Default locale not registered
    /// - No bundled dictionary for a locale
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_locale.is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.storage_key.is_empty() {
            errors.push(ValidationError::new(
                "storageKey",
                "The key cannot be empty. Example: \"locale\"",
            ));
        }

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "locales",
                "At least one locale is required. Example: [\"en\", \"th\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.locales.iter().enumerate() {
            if locale.is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    "The locale cannot be empty",
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            } else if self.locales_dir.is_none() && bundled_dictionary(locale).is_none() {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!(
                        "No bundled dictionary for '{locale}'. Set 'localesDir' to load dictionaries from disk"
                    ),
                ));
            }
        }

        if !self.default_locale.is_empty()
            && !self.locales.is_empty()
            && !self.locales.contains(&self.default_locale)
        {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "The default locale '{}' must be listed in 'locales'",
                    self.default_locale
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Resolves relative paths against `root`.
    #[must_use]
    pub fn relative_to(mut self, root: &Path) -> Self {
        self.locales_dir = self.locales_dir.map(|dir| root.join(dir));
        self.preferences_file = self.preferences_file.map(|file| root.join(file));
        self
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            storage_key: LOCALE_STORAGE_KEY.to_string(),
            locales: SUPPORTED_LOCALES.iter().map(ToString::to_string).collect(),
            locales_dir: None,
            preferences_file: None,
        }
    }
}
