use crate::enums::{SetupGrade, TradeResult, TradeType};
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel the journal stores when a trade carries no mistake label.
pub const NO_MISTAKE: &str = "None";

/// A single logged trading event.
///
/// Trades are immutable once logged; the analytics layer treats a slice of
/// them as a read-only snapshot. `pnl` is taken as given per trade and is
/// not re-validated against `result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub user_id: i64,
    /// Point in time the trade was recorded.
    pub timestamp: DateTime<Utc>,
    pub session: String,
    pub strategy: String,
    pub result: TradeResult,
    pub pnl: Decimal,
    /// Target risk:reward, expressed as a ratio string such as `"1:3"`.
    pub rr: String,
    /// Mistake label, with [`NO_MISTAKE`] meaning no mistake was logged.
    pub mistake: String,
    pub emotion: Option<String>,
    pub screenshot_url: Option<String>,
    pub trade_type: TradeType,
    pub setup_grade: Option<SetupGrade>,
    /// Calendar date the trade belongs to, possibly distinct from `timestamp`.
    pub log_date: Option<NaiveDate>,
    /// Time of day the trade was entered.
    pub entry_time: Option<NaiveTime>,
}

impl Trade {
    /// Whether a real mistake label is attached (the `"None"` sentinel does not count).
    pub fn has_mistake(&self) -> bool {
        self.mistake != NO_MISTAKE
    }
}

/// Optional narrowing applied when fetching a user's trades.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilter {
    pub trade_type: Option<TradeType>,
    pub limit: Option<i64>,
}

impl TradeFilter {
    pub fn for_type(trade_type: TradeType) -> Self {
        Self {
            trade_type: Some(trade_type),
            limit: None,
        }
    }
}

/// The authenticated identity handed to us by the external OAuth/session layer.
///
/// Always a fully typed struct with named fields; the session is never passed
/// around as an untyped bag of claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    pub discord_id: String,
    pub username: String,
    pub avatar: Option<String>,
}

impl UserSession {
    /// The journal keys trades by the numeric Discord id.
    pub fn user_id(&self) -> Result<i64, CoreError> {
        self.discord_id.parse().map_err(|_| {
            CoreError::InvalidInput("discord_id".to_string(), self.discord_id.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_resolves_numeric_discord_id() {
        let session = UserSession {
            id: "1".to_string(),
            discord_id: "123456789012345678".to_string(),
            username: "trader".to_string(),
            avatar: None,
        };
        assert_eq!(session.user_id().unwrap(), 123456789012345678);
    }

    #[test]
    fn session_rejects_non_numeric_discord_id() {
        let session = UserSession {
            id: "1".to_string(),
            discord_id: "not-a-snowflake".to_string(),
            username: "trader".to_string(),
            avatar: None,
        };
        assert!(session.user_id().is_err());
    }

    #[test]
    fn mistake_sentinel_is_not_a_mistake() {
        let mut trade = Trade {
            id: 1,
            user_id: 1,
            timestamp: Utc::now(),
            session: "London".to_string(),
            strategy: "Breakout".to_string(),
            result: TradeResult::Win,
            pnl: Decimal::new(12550, 2),
            rr: "1:2".to_string(),
            mistake: NO_MISTAKE.to_string(),
            emotion: None,
            screenshot_url: None,
            trade_type: TradeType::Live,
            setup_grade: Some(SetupGrade::A),
            log_date: None,
            entry_time: None,
        };
        assert!(!trade.has_mistake());
        trade.mistake = "FOMO entry".to_string();
        assert!(trade.has_mistake());
    }
}
