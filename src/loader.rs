//! Lazy dictionary loaders.

use std::future::Future;
use std::path::{
    Path,
    PathBuf,
};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dictionary::Dictionary;

/// Errors produced while loading a dictionary.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The dictionary source could not be read.
    #[error("Failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    /// The dictionary is not valid JSON.
    #[error("Failed to parse dictionary: {0}")]
    Parse(#[from] serde_json::Error),

    /// A custom loader reported a failure.
    #[error("Dictionary loader failed: {0}")]
    Loader(String),
}

/// Future returned by [`DictionaryLoader::load`].
pub type LoadFuture = BoxFuture<'static, Result<Dictionary, LoadError>>;

/// Deferred source of a locale's dictionary.
///
/// Nothing happens until [`load`](Self::load) is called; the runtime calls it
/// the first time the locale is activated.
pub trait DictionaryLoader: Send + Sync {
    /// Starts loading the dictionary.
    fn load(&self) -> LoadFuture;
}

impl<F, Fut> DictionaryLoader for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Dictionary, LoadError>> + Send + 'static,
{
    fn load(&self) -> LoadFuture {
        Box::pin(self())
    }
}

/// Loader over JSON compiled into the binary. Parsing is deferred to `load`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedLoader {
    /// Raw JSON text.
    source: &'static str,
}

impl EmbeddedLoader {
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }
}

impl DictionaryLoader for EmbeddedLoader {
    fn load(&self) -> LoadFuture {
        let source = self.source;
        Box::pin(async move { Dictionary::from_json_str(source).map_err(LoadError::from) })
    }
}

/// Loader reading a JSON dictionary file on demand.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    /// Dictionary file location.
    path: PathBuf,
}

impl JsonFileLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionaryLoader for JsonFileLoader {
    fn load(&self) -> LoadFuture {
        let path = self.path.clone();
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "Reading dictionary file");
            let content = tokio::fs::read_to_string(&path).await?;
            Ok::<_, LoadError>(Dictionary::from_json_str(&content)?)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn embedded_loader_parses_on_load() {
        let loader = EmbeddedLoader::new(r#"{"greeting": {"hello": "Hello"}}"#);

        let dict = tokio_test::block_on(loader.load()).unwrap();

        expect_that!(dict.get("greeting.hello"), some(eq("Hello")));
    }

    #[googletest::test]
    fn embedded_loader_reports_parse_error() {
        let loader = EmbeddedLoader::new("{");

        let result = tokio_test::block_on(loader.load());

        expect_that!(matches!(result, Err(LoadError::Parse(_))), eq(true));
    }

    #[tokio::test]
    async fn json_file_loader_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("th.json");
        fs::write(&path, r#"{"title": "สวัสดี"}"#).unwrap();

        let dict = JsonFileLoader::new(&path).load().await.unwrap();

        assert_eq!(dict.get("title"), Some("สวัสดี"));
    }

    #[tokio::test]
    async fn json_file_loader_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = JsonFileLoader::new(temp_dir.path().join("missing.json")).load().await;

        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[tokio::test]
    async fn closure_is_a_loader() {
        let loader = || async {
            Ok::<_, LoadError>(Dictionary::from_iter([("k".to_string(), "v".to_string())]))
        };

        let dict = loader.load().await.unwrap();

        assert_eq!(dict.get("k"), Some("v"));
    }
}
