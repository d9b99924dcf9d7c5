//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// Settings file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".i18n-bootstrap.json";

/// プロジェクトルートから設定を読み込む
///
/// `.i18n-bootstrap.json` ファイルを探して読み込む。
/// 相対パスはプロジェクトルートを基準に解決する。
///
/// # Arguments
/// * `project_root` - プロジェクトのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_project(project_root: &Path) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(Some(settings.relative_to(project_root)))
}

/// プロジェクトの設定を読み込み、検証する
///
/// 設定ファイルがない場合はデフォルト値を使う。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(project_root: &Path) -> Result<I18nSettings, ConfigError> {
    let settings = load_from_project(project_root)?.unwrap_or_default();
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded: {:?}", settings);
    Ok(settings)
}
