//! Bootstraps the i18n runtime for the current project and reports the active locale.

use std::process::ExitCode;

use i18n_bootstrap::LocaleBootstrapper;
use i18n_bootstrap::environment::{
    ClientEnvironment,
    Environment,
    ServerEnvironment,
};
use i18n_bootstrap::storage::FileStorage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let project_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!("Failed to determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bootstrapper = match LocaleBootstrapper::from_project(&project_root) {
        Ok(bootstrapper) => bootstrapper,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let env: Box<dyn Environment> = match &bootstrapper.settings().preferences_file {
        Some(path) => Box::new(ClientEnvironment::new(FileStorage::new(path))),
        None => Box::new(ServerEnvironment),
    };

    match bootstrapper.bootstrap_global(env.as_ref()).await {
        Ok(handle) => {
            tracing::info!(
                locale = ?handle.get(),
                fallback = %handle.runtime().fallback_locale(),
                title = %handle.runtime().translate("app.title"),
                "i18n runtime ready"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
