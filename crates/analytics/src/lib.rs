//! # Trade Journal Analytics
//!
//! This crate derives performance statistics from a user's logged trades:
//! streaks, equity curve, drawdown, grouped breakdowns and efficiency ratios.
//! It acts as the "unbiased judge" of the journal.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** It has no knowledge of external systems. It depends
//!   only on `core-types`. Fetching trades, authenticating users and rendering
//!   output are the callers' concerns.
//! - **Stateless calculation:** Every function here is a synchronous,
//!   side-effect-free computation over an in-memory slice of trades supplied
//!   already ordered (ascending by timestamp unless noted) and already
//!   filtered to a single user. Calling a function twice on the same input
//!   yields identical output.
//! - **Rounding at the boundary:** Accumulators are kept unrounded; monetary
//!   and percentage figures are rounded to 2 decimal places (midpoint away
//!   from zero) only when a value is emitted into a report struct.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: composes the individual functions into a
//!   `PerformanceSummary` for one user's history.
//! - `streaks`, `equity`, `grouping`, `metrics`: the individual calculators.
//! - `report`: the serializable output structs consumed by presentation layers.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod equity;
pub mod error;
pub mod grouping;
pub mod metrics;
pub mod report;
pub mod streaks;

mod round;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    CalendarDay, CurrentStreak, EquityPoint, GradeStats, HourOfDayStats, MistakeStats,
    MistakeTrend, PerformanceSummary, RrEfficiency, StrategyStats, StreakInfo, StreakKind,
    UserStats, WeekdayStats,
};
pub use round::round2;
