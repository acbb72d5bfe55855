//! Win/loss streak tracking.
//!
//! A streak is a maximal run of consecutive non-breakeven trades with the
//! same result. A breakeven trade breaks any running streak.

use crate::report::{CurrentStreak, StreakInfo, StreakKind};
use core_types::{Trade, TradeResult};

/// The streak the user is currently on, scanning backwards from the most
/// recent trade until a different result or a breakeven is hit.
///
/// Expects trades ordered ascending by timestamp (the scan itself walks the
/// slice in reverse). A breakeven as the latest trade means no streak.
pub fn current_streak(trades: &[Trade]) -> CurrentStreak {
    let Some(latest) = trades.last() else {
        return CurrentStreak::none();
    };

    let kind = match latest.result {
        TradeResult::Win => StreakKind::Win,
        TradeResult::Loss => StreakKind::Loss,
        TradeResult::Breakeven => return CurrentStreak::none(),
    };

    let count = trades
        .iter()
        .rev()
        .take_while(|t| t.result == latest.result)
        .count();

    CurrentStreak { kind, count }
}

/// Longest win and loss runs over the whole history, plus the current streak.
///
/// Expects trades ordered ascending by timestamp.
pub fn streak_info(trades: &[Trade]) -> StreakInfo {
    let mut longest_win = 0usize;
    let mut longest_loss = 0usize;
    let mut run = 0usize;
    let mut run_result: Option<TradeResult> = None;

    for trade in trades {
        match trade.result {
            TradeResult::Breakeven => {
                run = 0;
                run_result = None;
            }
            result => {
                if run_result == Some(result) {
                    run += 1;
                } else {
                    run = 1;
                    run_result = Some(result);
                }
                match result {
                    TradeResult::Win => longest_win = longest_win.max(run),
                    TradeResult::Loss => longest_loss = longest_loss.max(run),
                    TradeResult::Breakeven => unreachable!(),
                }
            }
        }
    }

    let current = current_streak(trades);

    StreakInfo {
        longest_win_streak: longest_win,
        longest_loss_streak: longest_loss,
        current_streak_type: current.kind,
        current_streak_count: current.count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::trades_from_results;
    use core_types::TradeResult::{Breakeven, Loss, Win};

    #[test]
    fn empty_history_has_no_streaks() {
        let info = streak_info(&[]);
        assert_eq!(info.longest_win_streak, 0);
        assert_eq!(info.longest_loss_streak, 0);
        assert_eq!(info.current_streak_type, StreakKind::None);
        assert_eq!(info.current_streak_count, 0);
    }

    #[test]
    fn current_streak_tracks_latest_run() {
        let trades = trades_from_results(&[Win, Win, Loss]);
        let current = current_streak(&trades);
        assert_eq!(current.kind, StreakKind::Loss);
        assert_eq!(current.count, 1);

        let trades = trades_from_results(&[Win, Win, Win]);
        let current = current_streak(&trades);
        assert_eq!(current.kind, StreakKind::Win);
        assert_eq!(current.count, 3);
    }

    #[test]
    fn breakeven_breaks_the_prior_run() {
        let trades = trades_from_results(&[Win, Breakeven, Win]);
        let current = current_streak(&trades);
        assert_eq!(current.kind, StreakKind::Win);
        assert_eq!(current.count, 1);
    }

    #[test]
    fn breakeven_as_latest_trade_means_no_streak() {
        let trades = trades_from_results(&[Win, Win, Breakeven]);
        assert_eq!(current_streak(&trades), CurrentStreak::none());

        let trades = trades_from_results(&[Breakeven]);
        let info = streak_info(&trades);
        assert_eq!(info.current_streak_type, StreakKind::None);
        assert_eq!(info.longest_win_streak, 0);
        assert_eq!(info.longest_loss_streak, 0);
    }

    #[test]
    fn longest_runs_span_the_whole_history() {
        let trades = trades_from_results(&[Win, Win, Loss, Win, Win, Win, Loss, Loss]);
        let info = streak_info(&trades);
        assert_eq!(info.longest_win_streak, 3);
        assert_eq!(info.longest_loss_streak, 2);
        assert_eq!(info.current_streak_type, StreakKind::Loss);
        assert_eq!(info.current_streak_count, 2);
    }

    #[test]
    fn breakeven_resets_the_longest_run_accounting() {
        let trades = trades_from_results(&[Win, Win, Breakeven, Win, Loss]);
        let info = streak_info(&trades);
        assert_eq!(info.longest_win_streak, 2);
        assert_eq!(info.longest_loss_streak, 1);
    }
}
