//! ロケール初期化の結合テスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;

use googletest::prelude::*;
use i18n_bootstrap::LocaleBootstrapper;
use i18n_bootstrap::config::{
    CONFIG_FILE_NAME,
    ConfigError,
};
use i18n_bootstrap::environment::{
    ClientEnvironment,
    Environment,
    ServerEnvironment,
};
use i18n_bootstrap::storage::{
    FileStorage,
    MemoryStorage,
    PreferenceStorage,
    StorageError,
};
use i18n_bootstrap::types::I18nConfig;
use rstest::rstest;
use tempfile::TempDir;

#[googletest::test]
fn browser_with_thai_preference_configures_thai() {
    let env = ClientEnvironment::new(MemoryStorage::with_items([("locale", "th")]));

    let config = LocaleBootstrapper::default().config(&env);

    expect_that!(
        config,
        eq(&I18nConfig { fallback_locale: "en".into(), initial_locale: "th".into() })
    );
}

/// Headless context that nevertheless carries storage content.
struct HeadlessWithStorage(MemoryStorage);

impl Environment for HeadlessWithStorage {
    fn is_browser(&self) -> bool {
        false
    }

    fn read_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_item(key)
    }
}

#[rstest]
#[case(MemoryStorage::new())]
#[case(MemoryStorage::with_items([("locale", "th")]))]
#[case(MemoryStorage::with_items([("locale", "fr")]))]
fn non_browser_always_configures_english(#[case] storage: MemoryStorage) {
    let expected = I18nConfig { fallback_locale: "en".into(), initial_locale: "en".into() };

    assert_eq!(LocaleBootstrapper::default().config(&HeadlessWithStorage(storage)), expected);
    assert_eq!(LocaleBootstrapper::default().config(&ServerEnvironment), expected);
}

#[tokio::test]
async fn stale_preference_resolves_through_english() {
    let env = ClientEnvironment::new(MemoryStorage::with_items([("locale", "fr")]));

    let runtime = LocaleBootstrapper::default().bootstrap(&env).await;

    assert_eq!(runtime.current_locale(), Some("fr".into()));
    assert_eq!(runtime.translate("settings.language"), "Language");
}

#[tokio::test]
async fn switching_locale_through_handle_updates_translations() {
    let runtime = LocaleBootstrapper::default().bootstrap(&ServerEnvironment).await;
    let handle = runtime.locale();
    assert_eq!(runtime.translate("nav.settings"), "Settings");

    handle.set("th").await.unwrap();

    assert_eq!(handle.get(), Some("th".into()));
    assert_eq!(runtime.translate("nav.settings"), "การตั้งค่า");
}

#[tokio::test]
async fn project_settings_and_file_preferences() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"{"storageKey": "lang", "preferencesFile": "state/prefs.json"}"#,
    )
    .unwrap();
    let storage = FileStorage::new(temp_dir.path().join("state/prefs.json"));
    storage.set_item("lang", "th").unwrap();

    let bootstrapper = LocaleBootstrapper::from_project(temp_dir.path()).unwrap();
    let preferences_file = bootstrapper.settings().preferences_file.clone().unwrap();
    let env = ClientEnvironment::new(FileStorage::new(preferences_file));

    let runtime = bootstrapper.bootstrap(&env).await;

    assert_eq!(runtime.current_locale(), Some("th".into()));
    assert_eq!(runtime.translate("app.title"), "ยินดีต้อนรับ");
}

#[rstest]
fn invalid_project_settings_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"locales": ["en", "fr"]}"#).unwrap();

    let result = LocaleBootstrapper::from_project(temp_dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
}
