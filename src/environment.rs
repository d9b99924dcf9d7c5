//! Execution environments.
//!
//! Locale bootstrapping behaves differently in an interactive client, where a
//! persisted preference may exist, and in a headless context such as server
//! rendering, where no client storage is reachable.

use std::fmt;

use crate::storage::{
    PreferenceStorage,
    StorageError,
};

/// Where the application is running.
pub trait Environment: Send + Sync {
    /// Whether this is an interactive client with access to persisted preferences.
    fn is_browser(&self) -> bool;

    /// Reads a persisted preference.
    ///
    /// # Errors
    /// Returns an error if the client storage cannot be read.
    fn read_preference(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Interactive client backed by preference storage.
pub struct ClientEnvironment<S> {
    /// Client-side persistent storage.
    storage: S,
}

impl<S: PreferenceStorage> ClientEnvironment<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: PreferenceStorage> Environment for ClientEnvironment<S> {
    fn is_browser(&self) -> bool {
        true
    }

    fn read_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key)
    }
}

impl<S> fmt::Debug for ClientEnvironment<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientEnvironment").finish_non_exhaustive()
    }
}

/// Headless context with no client storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerEnvironment;

impl Environment for ServerEnvironment {
    fn is_browser(&self) -> bool {
        false
    }

    fn read_preference(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::storage::MemoryStorage;

    #[googletest::test]
    fn client_reads_from_storage() {
        let env = ClientEnvironment::new(MemoryStorage::with_items([("locale", "th")]));

        expect_that!(env.is_browser(), eq(true));
        expect_that!(env.read_preference("locale").unwrap(), some(eq("th")));
        expect_that!(env.read_preference("theme").unwrap(), none());
    }

    #[googletest::test]
    fn server_has_no_preferences() {
        let env = ServerEnvironment;

        expect_that!(env.is_browser(), eq(false));
        expect_that!(env.read_preference("locale").unwrap(), none());
    }
}
