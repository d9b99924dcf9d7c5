//! i18n-bootstrap
//!
//! クライアントアプリケーション向けのロケール初期化ライブラリ。
//! 辞書の遅延読み込み、永続化されたロケール設定の復元、リアクティブなロケールハンドルを提供する。

pub mod bootstrap;
pub mod config;
pub mod dictionary;
pub mod environment;
pub mod loader;
pub mod registry;
pub mod runtime;
pub mod storage;
mod test_utils;
pub mod types;

pub use bootstrap::LocaleBootstrapper;
pub use runtime::global::locale;
pub use runtime::{
    I18nRuntime,
    LocaleHandle,
    RuntimeError,
};
