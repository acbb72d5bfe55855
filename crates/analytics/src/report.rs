use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of the streak a user is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    None,
}

/// The most recent run of identical results, scanned backwards from the
/// latest trade. A breakeven trade at the tail means no current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStreak {
    #[serde(rename = "type")]
    pub kind: StreakKind,
    pub count: usize,
}

impl CurrentStreak {
    pub fn none() -> Self {
        Self {
            kind: StreakKind::None,
            count: 0,
        }
    }
}

/// Longest win/loss runs over the whole history plus the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub current_streak_type: StreakKind,
    pub current_streak_count: usize,
}

/// One point of the running cumulative P&L curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub cumulative_pnl: Decimal,
}

/// The dashboard stat-card payload for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakeven: usize,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
}

/// Performance within one hour of the trading day (keyed on entry time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourOfDayStats {
    pub hour: u32,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Performance grouped by weekday of the log date. `day_of_week` follows
/// the journal's convention of 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayStats {
    pub day_of_week: u32,
    pub day_name: String,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Performance breakdown for one strategy label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStats {
    pub strategy: String,
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Performance breakdown for one setup grade (ungraded trades excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeStats {
    pub grade: String,
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Frequency and cost of one mistake label.
///
/// `total_cost` is the signed sum of pnl for trades carrying the mistake:
/// a more costly mistake is a more negative number, not a larger magnitude.
/// Callers looking for the most costly mistake must take the minimum signed
/// value rather than comparing absolute values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeStats {
    pub mistake: String,
    pub frequency: usize,
    pub total_cost: Decimal,
    pub avg_cost: Decimal,
    /// Share of all logged mistake occurrences, in percent.
    pub percentage: Decimal,
}

/// Count of one mistake label on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeTrend {
    pub date: NaiveDate,
    pub mistake: String,
    pub count: usize,
}

/// Daily totals for the calendar heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
}

/// Actual-versus-target outcome for one target risk:reward bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrEfficiency {
    pub target_rr: String,
    pub count: usize,
    pub wins: usize,
    pub avg_actual_rr: Decimal,
    /// Percentage of the targeted multiple actually achieved.
    pub efficiency: Decimal,
}

/// The full performance picture for one user's trade history.
///
/// This struct is the final output of the [`crate::AnalyticsEngine`] and the
/// data transfer object handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    // I. Core counts
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakeven: usize,

    // II. Profitability
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
    pub average_win: Decimal,
    /// Magnitude (positive) of the average losing trade.
    pub average_loss: Decimal,
    pub profit_factor: Decimal,
    pub expectancy: Decimal,

    // III. Risk
    pub sharpe_ratio: Decimal,
    pub max_drawdown_pct: Decimal,

    // IV. Streaks
    pub streaks: StreakInfo,
}

impl PerformanceSummary {
    /// Creates a zeroed-out summary, the result for an empty trade history.
    pub fn empty() -> Self {
        Self {
            total_trades: 0,
            wins: 0,
            losses: 0,
            breakeven: 0,
            total_pnl: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            expectancy: Decimal::ZERO,
            sharpe_ratio: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            streaks: StreakInfo {
                longest_win_streak: 0,
                longest_loss_streak: 0,
                current_streak_type: StreakKind::None,
                current_streak_count: 0,
            },
        }
    }
}

impl Default for PerformanceSummary {
    fn default() -> Self {
        Self::empty()
    }
}
