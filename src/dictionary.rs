//! Translation dictionaries

use std::collections::HashMap;

use serde_json::Value;

/// Separator joining nested object keys in a flattened dictionary.
pub const KEY_SEPARATOR: &str = ".";

/// Translations of one locale, flattened from a nested JSON document.
///
/// `{"nav": {"home": "Home"}}` is stored as `nav.home -> Home`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// Flattened key to translated string.
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Builds a dictionary from a parsed JSON document.
    #[must_use]
    pub fn from_value(json: &Value) -> Self {
        let mut entries = HashMap::new();
        flatten_into(json, None, &mut entries);
        Self { entries }
    }

    /// Parses a JSON document into a dictionary.
    ///
    /// # Errors
    /// Returns the parse error if `text` is not valid JSON.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let json: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&json))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `other` into `self`. Keys present in both take `other`'s value.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(String, String)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Walks `json` and records every leaf under its dotted path.
fn flatten_into(json: &Value, prefix: Option<&str>, entries: &mut HashMap<String, String>) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{KEY_SEPARATOR}{key}"));
                flatten_into(value, Some(&full_key), entries);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_into(value, Some(&full_key), entries);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                entries.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                entries.insert(key.to_string(), json.to_string());
            }
        }
    }
}
