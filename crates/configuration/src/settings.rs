use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub analytics: AnalyticsSettings,
}

/// Where the journal database lives and how it is opened.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite journal file. The store is assumed pre-populated
    /// by the logging process; we only ever read it.
    pub path: String,
    /// Maximum connections in the read pool.
    pub max_connections: u32,
}

/// Tunables for the analytics calculations.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Risk-free rate per trade period used by the Sharpe ratio.
    pub risk_free_rate: Decimal,
}
