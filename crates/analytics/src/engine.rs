use crate::equity::{equity_curve, max_drawdown};
use crate::error::AnalyticsError;
use crate::metrics;
use crate::report::{PerformanceSummary, UserStats};
use crate::round::round2;
use crate::streaks::streak_info;
use core_types::Trade;
use rust_decimal::Decimal;
use tracing::debug;

/// A stateless calculator composing the individual analytics functions into
/// a full performance picture for one user's trade history.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    /// Risk-free rate handed to the Sharpe calculation, per trade period.
    risk_free_rate: Decimal,
}

impl AnalyticsEngine {
    pub fn new(risk_free_rate: Decimal) -> Self {
        Self { risk_free_rate }
    }

    /// The dashboard stat-card figures. Order-insensitive.
    pub fn user_stats(&self, trades: &[Trade]) -> UserStats {
        let total_trades = trades.len();
        let wins = trades.iter().filter(|t| t.result.is_win()).count();
        let losses = trades.iter().filter(|t| t.result.is_loss()).count();
        let breakeven = total_trades - wins - losses;
        let total_pnl: Decimal = trades.iter().map(|t| t.pnl).sum();

        UserStats {
            total_trades,
            wins,
            losses,
            breakeven,
            total_pnl: round2(total_pnl),
            win_rate: round2(metrics::win_rate(wins, total_trades)),
        }
    }

    /// Full performance summary over trades ordered ascending by timestamp.
    ///
    /// The ordering contract is validated up front because streaks, the
    /// equity curve and drawdown are all order-sensitive.
    pub fn summary(&self, trades: &[Trade]) -> Result<PerformanceSummary, AnalyticsError> {
        if let Some(out_of_order) = first_out_of_order(trades) {
            return Err(AnalyticsError::UnsortedInput(out_of_order));
        }

        if trades.is_empty() {
            return Ok(PerformanceSummary::empty());
        }

        let wins = trades.iter().filter(|t| t.result.is_win()).count();
        let losses = trades.iter().filter(|t| t.result.is_loss()).count();
        let breakeven = trades.len() - wins - losses;

        let total_pnl: Decimal = trades.iter().map(|t| t.pnl).sum();
        let gross_win: Decimal = trades
            .iter()
            .filter(|t| t.result.is_win())
            .map(|t| t.pnl)
            .sum();
        let gross_loss: Decimal = trades
            .iter()
            .filter(|t| t.result.is_loss())
            .map(|t| t.pnl)
            .sum();

        // Unrounded internals; every figure is rounded once, on the way out.
        let win_rate = metrics::win_rate(wins, trades.len());
        let average_win = if wins > 0 {
            gross_win / Decimal::from(wins)
        } else {
            Decimal::ZERO
        };
        let average_loss = if losses > 0 {
            (gross_loss / Decimal::from(losses)).abs()
        } else {
            Decimal::ZERO
        };

        let returns: Vec<Decimal> = trades.iter().map(|t| t.pnl).collect();
        let curve: Vec<Decimal> = equity_curve(trades)
            .into_iter()
            .map(|p| p.cumulative_pnl)
            .collect();

        let summary = PerformanceSummary {
            total_trades: trades.len(),
            wins,
            losses,
            breakeven,
            total_pnl: round2(total_pnl),
            win_rate: round2(win_rate),
            average_win: round2(average_win),
            average_loss: round2(average_loss),
            profit_factor: round2(metrics::profit_factor(average_win, average_loss)),
            expectancy: round2(metrics::expectancy(win_rate, average_win, average_loss)),
            sharpe_ratio: round2(metrics::sharpe_ratio(&returns, self.risk_free_rate)),
            max_drawdown_pct: max_drawdown(&curve),
            streaks: streak_info(trades),
        };

        debug!(
            trades = summary.total_trades,
            win_rate = %summary.win_rate,
            total_pnl = %summary.total_pnl,
            "computed performance summary"
        );

        Ok(summary)
    }
}

fn first_out_of_order(trades: &[Trade]) -> Option<i64> {
    trades
        .windows(2)
        .find(|w| w[1].timestamp < w[0].timestamp)
        .map(|w| w[1].id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::StreakKind;
    use crate::testutil::trade;
    use core_types::TradeResult::{Breakeven, Loss, Win};
    use rust_decimal_macros::dec;

    #[test]
    fn empty_history_yields_a_zeroed_summary() {
        let engine = AnalyticsEngine::default();
        let summary = engine.summary(&[]).unwrap();
        assert_eq!(summary, PerformanceSummary::empty());
    }

    #[test]
    fn summary_matches_the_reference_scenario() {
        // [100 win, -40 loss, -20 loss, 60 win], ascending.
        let trades = vec![
            trade(0, Win, dec!(100)),
            trade(1, Loss, dec!(-40)),
            trade(2, Loss, dec!(-20)),
            trade(3, Win, dec!(60)),
        ];
        let engine = AnalyticsEngine::default();
        let summary = engine.summary(&trades).unwrap();

        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.total_pnl, dec!(100));
        assert_eq!(summary.win_rate, dec!(50));
        assert_eq!(summary.average_win, dec!(80));
        assert_eq!(summary.average_loss, dec!(30));
        // 80 / 30, rounded at the boundary.
        assert_eq!(summary.profit_factor, dec!(2.67));
        // 0.5*80 - 0.5*30
        assert_eq!(summary.expectancy, dec!(25));
        assert_eq!(summary.max_drawdown_pct, dec!(60));
        assert_eq!(summary.streaks.longest_loss_streak, 2);
        assert_eq!(summary.streaks.current_streak_type, StreakKind::Win);
        assert_eq!(summary.streaks.current_streak_count, 1);
    }

    #[test]
    fn no_losses_means_zero_profit_factor() {
        let trades = vec![trade(0, Win, dec!(50)), trade(1, Win, dec!(70))];
        let summary = AnalyticsEngine::default().summary(&trades).unwrap();
        assert_eq!(summary.profit_factor, Decimal::ZERO);
        assert_eq!(summary.average_loss, Decimal::ZERO);
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let a = trade(5, Win, dec!(10));
        let b = trade(1, Loss, dec!(-10));
        let err = AnalyticsEngine::default().summary(&[a, b]).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnsortedInput(1)));
    }

    #[test]
    fn user_stats_count_every_result_kind() {
        let trades = vec![
            trade(0, Win, dec!(100)),
            trade(1, Breakeven, dec!(0)),
            trade(2, Loss, dec!(-40.555)),
        ];
        let stats = AnalyticsEngine::default().user_stats(&trades);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.breakeven, 1);
        assert_eq!(stats.total_pnl, dec!(59.45));
        assert_eq!(stats.win_rate, dec!(33.33));
    }
}
