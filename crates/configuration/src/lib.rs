// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{AnalyticsSettings, DatabaseSettings, Settings};

/// Loads the application configuration.
///
/// Reads `journal.toml` from the working directory when present, then applies
/// `JOURNAL_*` environment overrides (e.g. `JOURNAL_DATABASE__PATH`), on top
/// of built-in defaults. The result is deserialized into the strongly-typed
/// [`Settings`] struct.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("database.path", "trades.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("analytics.risk_free_rate", "0")?
        .add_source(config::File::with_name("journal.toml").required(false))
        .add_source(config::Environment::with_prefix("JOURNAL").separator("__"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    if settings.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    Ok(settings)
}
