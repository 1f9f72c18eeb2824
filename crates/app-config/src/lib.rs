// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ServerSettings, Settings};

/// Loads the application settings from the `config/` directory.
///
/// See [`load_settings_from`] for the layering rules.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from `dir`.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    load_settings_with_env(dir, environment_source())
}

/// Environment variable layer, e.g. `APP_SERVER__PORT=8080` sets `server.port`.
///
/// The prefix is `APP` joined by a single `_`; nested keys are joined by `__`.
fn environment_source() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_settings_with_env(dir: &Path, env: Environment) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::from(dir.join("base")))
        // 2. Load the environment-specific configuration file.
        .add_source(File::from(dir.join(&environment)).required(false))
        // 3. Load settings from environment variables.
        .add_source(env)
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}
