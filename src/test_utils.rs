//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のフェイク実装を提供します。
#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use crate::dictionary::Dictionary;
use crate::environment::Environment;
use crate::loader::{
    DictionaryLoader,
    LoadError,
    LoadFuture,
};
use crate::storage::{
    MemoryStorage,
    PreferenceStorage,
    StorageError,
};

/// 呼び出し回数を記録するローダー
///
/// クローンは呼び出し回数を共有します。
#[derive(Debug, Clone)]
pub(crate) struct CountingLoader {
    /// 返却する辞書の内容
    entries: Vec<(String, String)>,
    /// `load` の呼び出し回数
    calls: Arc<AtomicUsize>,
}

impl CountingLoader {
    pub(crate) fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DictionaryLoader for CountingLoader {
    fn load(&self) -> LoadFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let dictionary: Dictionary = self.entries.iter().cloned().collect();
        Box::pin(async move {
            tokio::task::yield_now().await;
            Ok::<_, LoadError>(dictionary)
        })
    }
}

/// 常に失敗するローダー
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingLoader;

impl DictionaryLoader for FailingLoader {
    fn load(&self) -> LoadFuture {
        Box::pin(async {
            Err::<Dictionary, _>(LoadError::Loader("unreachable bundle".to_string()))
        })
    }
}

/// 読み書きが常に失敗するストレージ（ストレージ無効化の再現）
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingStorage;

impl PreferenceStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "storage disabled",
        )))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("storage disabled")))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("storage disabled")))
    }
}

/// ストレージの読み取り回数を記録する環境
#[derive(Debug)]
pub(crate) struct FakeEnvironment {
    /// `is_browser` の戻り値
    browser: bool,
    /// 永続化された設定
    storage: MemoryStorage,
    /// `read_preference` の呼び出し回数
    reads: AtomicUsize,
}

impl FakeEnvironment {
    fn new(browser: bool, stored: Option<&str>) -> Self {
        Self {
            browser,
            storage: MemoryStorage::with_items(stored.map(|locale| ("locale", locale))),
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn browser(stored: Option<&str>) -> Self {
        Self::new(true, stored)
    }

    /// ストレージに値があっても非ブラウザとして振る舞う
    pub(crate) fn server(stored: Option<&str>) -> Self {
        Self::new(false, stored)
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Environment for FakeEnvironment {
    fn is_browser(&self) -> bool {
        self.browser
    }

    fn read_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.storage.get_item(key)
    }
}
