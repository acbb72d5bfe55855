//! Grouped performance breakdowns.
//!
//! Each aggregator partitions trades by a categorical key, tallies wins,
//! losses and pnl per group, and emits rounded per-group figures. Trades
//! missing the grouping key (no entry time, no log date, no grade, the
//! `"None"` mistake sentinel) are excluded from that grouping entirely, so
//! per-group counts always partition the trades that carry the key.

use crate::report::{
    CalendarDay, GradeStats, HourOfDayStats, MistakeStats, MistakeTrend, StrategyStats,
    WeekdayStats,
};
use crate::round::round2;
use core_types::Trade;
use chrono::{Datelike, NaiveDate, Timelike};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Unrounded running tally for one group.
#[derive(Debug, Default, Clone)]
struct Tally {
    count: usize,
    wins: usize,
    losses: usize,
    total_pnl: Decimal,
}

impl Tally {
    fn add(&mut self, trade: &Trade) {
        self.count += 1;
        if trade.result.is_win() {
            self.wins += 1;
        } else if trade.result.is_loss() {
            self.losses += 1;
        }
        self.total_pnl += trade.pnl;
    }

    fn win_rate(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        round2(Decimal::from(self.wins) / Decimal::from(self.count) * Decimal::ONE_HUNDRED)
    }

    fn avg_pnl(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        round2(self.total_pnl / Decimal::from(self.count))
    }
}

/// Performance by hour of the trading day, ascending by hour.
/// Trades without an entry time are excluded.
pub fn by_hour(trades: &[Trade]) -> Vec<HourOfDayStats> {
    let mut groups: BTreeMap<u32, Tally> = BTreeMap::new();
    for trade in trades {
        if let Some(entry_time) = trade.entry_time {
            groups.entry(entry_time.hour()).or_default().add(trade);
        }
    }

    groups
        .into_iter()
        .map(|(hour, tally)| HourOfDayStats {
            hour,
            total: tally.count,
            wins: tally.wins,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            avg_pnl: tally.avg_pnl(),
            total_pnl: round2(tally.total_pnl),
        })
        .collect()
}

/// Performance by weekday of the log date, Sunday through Saturday.
/// Trades without a log date are excluded.
pub fn by_weekday(trades: &[Trade]) -> Vec<WeekdayStats> {
    let mut groups: BTreeMap<u32, Tally> = BTreeMap::new();
    for trade in trades {
        if let Some(log_date) = trade.log_date {
            let day = log_date.weekday().num_days_from_sunday();
            groups.entry(day).or_default().add(trade);
        }
    }

    groups
        .into_iter()
        .map(|(day_of_week, tally)| WeekdayStats {
            day_of_week,
            day_name: DAY_NAMES[day_of_week as usize].to_string(),
            total: tally.count,
            wins: tally.wins,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            avg_pnl: tally.avg_pnl(),
            total_pnl: round2(tally.total_pnl),
        })
        .collect()
}

/// Performance by strategy label, descending by total pnl.
pub fn by_strategy(trades: &[Trade]) -> Vec<StrategyStats> {
    let mut groups: HashMap<String, Tally> = HashMap::new();
    for trade in trades {
        groups.entry(trade.strategy.clone()).or_default().add(trade);
    }

    let mut stats: Vec<StrategyStats> = groups
        .into_iter()
        .map(|(strategy, tally)| StrategyStats {
            strategy,
            count: tally.count,
            wins: tally.wins,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            avg_pnl: tally.avg_pnl(),
            total_pnl: round2(tally.total_pnl),
        })
        .collect();
    stats.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl).then(a.strategy.cmp(&b.strategy)));
    stats
}

/// Performance by setup grade, ordered by grade label. Ungraded trades are excluded.
pub fn by_setup_grade(trades: &[Trade]) -> Vec<GradeStats> {
    let mut groups: BTreeMap<String, Tally> = BTreeMap::new();
    for trade in trades {
        if let Some(grade) = trade.setup_grade {
            groups
                .entry(grade.label().to_string())
                .or_default()
                .add(trade);
        }
    }

    groups
        .into_iter()
        .map(|(grade, tally)| GradeStats {
            grade,
            count: tally.count,
            wins: tally.wins,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            avg_pnl: tally.avg_pnl(),
            total_pnl: round2(tally.total_pnl),
        })
        .collect()
}

/// Frequency and cost per mistake label, descending by frequency.
/// The `"None"` sentinel is excluded; `percentage` is each mistake's share
/// of all remaining mistake occurrences.
pub fn by_mistake(trades: &[Trade]) -> Vec<MistakeStats> {
    let mut groups: HashMap<String, Tally> = HashMap::new();
    for trade in trades {
        if trade.has_mistake() {
            groups.entry(trade.mistake.clone()).or_default().add(trade);
        }
    }

    let total_mistakes: usize = groups.values().map(|t| t.count).sum();

    let mut stats: Vec<MistakeStats> = groups
        .into_iter()
        .map(|(mistake, tally)| {
            let percentage = if total_mistakes > 0 {
                round2(
                    Decimal::from(tally.count) / Decimal::from(total_mistakes)
                        * Decimal::ONE_HUNDRED,
                )
            } else {
                Decimal::ZERO
            };
            MistakeStats {
                mistake,
                frequency: tally.count,
                total_cost: round2(tally.total_pnl),
                avg_cost: tally.avg_pnl(),
                percentage,
            }
        })
        .collect();
    stats.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.mistake.cmp(&b.mistake)));
    stats
}

/// Per-day mistake counts on or after `since`, most recent day first.
pub fn mistake_trends(trades: &[Trade], since: NaiveDate) -> Vec<MistakeTrend> {
    let mut groups: BTreeMap<(NaiveDate, String), usize> = BTreeMap::new();
    for trade in trades {
        if !trade.has_mistake() {
            continue;
        }
        let Some(date) = trade.log_date else { continue };
        if date < since {
            continue;
        }
        *groups.entry((date, trade.mistake.clone())).or_default() += 1;
    }

    groups
        .into_iter()
        .rev()
        .map(|((date, mistake), count)| MistakeTrend {
            date,
            mistake,
            count,
        })
        .collect()
}

/// Daily pnl and result totals over an inclusive log-date range, ascending.
pub fn calendar_days(trades: &[Trade], from: NaiveDate, to: NaiveDate) -> Vec<CalendarDay> {
    let mut groups: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    for trade in trades {
        let Some(date) = trade.log_date else { continue };
        if date < from || date > to {
            continue;
        }
        groups.entry(date).or_default().add(trade);
    }

    groups
        .into_iter()
        .map(|(date, tally)| CalendarDay {
            date,
            pnl: round2(tally.total_pnl),
            trades: tally.count,
            wins: tally.wins,
            losses: tally.losses,
        })
        .collect()
}
