//! Settings for locale bootstrapping
mod loader;
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_settings,
};
pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};
