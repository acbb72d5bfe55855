use crate::error::DbError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use core_types::{CoreError, Trade, TradeFilter};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

const TRADE_COLUMNS: &str = "id, user_id, timestamp, session, strategy, result, pnl, rr, \
     mistake, emotion, screenshot_url, trade_type, setup_grade, log_date, entry_time";

const DEFAULT_RECENT_LIMIT: i64 = 50;

/// The `JournalRepository` provides a high-level, read-only interface to the
/// trade journal. It encapsulates all SQL and row mapping.
///
/// Constructed explicitly with an injected pool; cloning is cheap and shares
/// the pool.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    pool: SqlitePool,
}

/// A raw row from the `trades` table, before the enum columns are parsed.
#[derive(Debug, Clone, FromRow)]
struct TradeRow {
    id: i64,
    user_id: i64,
    timestamp: DateTime<Utc>,
    session: String,
    strategy: String,
    result: String,
    pnl: f64,
    rr: String,
    mistake: String,
    emotion: Option<String>,
    screenshot_url: Option<String>,
    trade_type: String,
    setup_grade: Option<String>,
    log_date: Option<NaiveDate>,
    entry_time: Option<String>,
}

impl TryFrom<TradeRow> for Trade {
    type Error = CoreError;

    fn try_from(row: TradeRow) -> Result<Self, Self::Error> {
        let pnl = Decimal::from_f64(row.pnl)
            .ok_or_else(|| CoreError::InvalidInput("pnl".to_string(), row.pnl.to_string()))?;
        let setup_grade = row.setup_grade.as_deref().map(str::parse).transpose()?;
        let entry_time = row
            .entry_time
            .as_deref()
            .map(parse_entry_time)
            .transpose()?;

        Ok(Trade {
            id: row.id,
            user_id: row.user_id,
            timestamp: row.timestamp,
            session: row.session,
            strategy: row.strategy,
            result: row.result.parse()?,
            pnl,
            rr: row.rr,
            mistake: row.mistake,
            emotion: row.emotion,
            screenshot_url: row.screenshot_url,
            trade_type: row.trade_type.parse()?,
            setup_grade,
            log_date: row.log_date,
            entry_time,
        })
    }
}

/// Entry times are logged as `HH:MM`, occasionally with seconds.
fn parse_entry_time(s: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| CoreError::InvalidInput("entry_time".to_string(), s.to_string()))
}

impl JournalRepository {
    /// Creates a new `JournalRepository` with a shared connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A user's trades ordered ascending by timestamp, the order the
    /// analytics functions require. `filter.limit` caps the result when set.
    pub async fn trades_for_user(
        &self,
        user_id: i64,
        filter: &TradeFilter,
    ) -> Result<Vec<Trade>, DbError> {
        self.fetch(user_id, filter, "ASC", filter.limit).await
    }

    /// The most recent trades for the journal listing, newest first.
    pub async fn recent_trades(
        &self,
        user_id: i64,
        filter: &TradeFilter,
    ) -> Result<Vec<Trade>, DbError> {
        let limit = filter.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        self.fetch(user_id, filter, "DESC", Some(limit)).await
    }

    /// All trades logged on one calendar day, newest first.
    pub async fn trades_for_day(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Trade>, DbError> {
        let sql = format!(
            "SELECT {TRADE_COLUMNS} FROM trades \
             WHERE user_id = ? AND log_date = ? ORDER BY timestamp DESC"
        );
        let rows = sqlx::query_as::<_, TradeRow>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Self::decode(rows)
    }

    async fn fetch(
        &self,
        user_id: i64,
        filter: &TradeFilter,
        order: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Trade>, DbError> {
        let mut sql = format!("SELECT {TRADE_COLUMNS} FROM trades WHERE user_id = ?");
        if filter.trade_type.is_some() {
            sql.push_str(" AND trade_type = ?");
        }
        sql.push_str(" ORDER BY timestamp ");
        sql.push_str(order);
        if limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query_as::<_, TradeRow>(&sql).bind(user_id);
        if let Some(trade_type) = filter.trade_type {
            query = query.bind(trade_type.to_string());
        }
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(&self.pool).await?;
        debug!(user_id, rows = rows.len(), "fetched trades");
        Self::decode(rows)
    }

    fn decode(rows: Vec<TradeRow>) -> Result<Vec<Trade>, DbError> {
        rows.into_iter()
            .map(|row| Trade::try_from(row).map_err(DbError::from))
            .collect()
    }
}
