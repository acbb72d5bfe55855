//! Ratio and efficiency metrics.
//!
//! The scalar metrics here return unrounded values; callers round at the
//! output boundary. Divide-by-zero cases resolve to zero rather than
//! propagating infinities into a presentation layer.

use crate::report::RrEfficiency;
use crate::round::round2;
use core_types::Trade;
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::HashMap;

/// Wins as a percentage of total trades; zero when there are no trades.
pub fn win_rate(wins: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(wins) / Decimal::from(total) * Decimal::ONE_HUNDRED
}

/// Average win divided by average loss magnitude.
///
/// Defined as zero when the average loss magnitude is zero; a history with
/// no losses has no meaningful factor and must not surface as infinity.
pub fn profit_factor(avg_win: Decimal, avg_loss_magnitude: Decimal) -> Decimal {
    if avg_loss_magnitude.is_zero() {
        return Decimal::ZERO;
    }
    avg_win / avg_loss_magnitude.abs()
}

/// Expected P&L per trade given the win rate (percent) and average win/loss sizes.
pub fn expectancy(win_rate_pct: Decimal, avg_win: Decimal, avg_loss_magnitude: Decimal) -> Decimal {
    let p_win = win_rate_pct / Decimal::ONE_HUNDRED;
    let p_loss = (Decimal::ONE_HUNDRED - win_rate_pct) / Decimal::ONE_HUNDRED;
    p_win * avg_win - p_loss * avg_loss_magnitude.abs()
}

/// Simplified Sharpe ratio over a return series: mean excess return divided
/// by the population standard deviation. Not annualized. Zero for an empty
/// series or one with no variance.
pub fn sharpe_ratio(returns: &[Decimal], risk_free_rate: Decimal) -> Decimal {
    if returns.is_empty() {
        return Decimal::ZERO;
    }

    let n = Decimal::from(returns.len());
    let mean: Decimal = returns.iter().sum::<Decimal>() / n;
    let variance: Decimal = returns
        .iter()
        .map(|r| (*r - mean) * (*r - mean))
        .sum::<Decimal>()
        / n;

    match variance.sqrt() {
        Some(std_dev) if !std_dev.is_zero() => (mean - risk_free_rate) / std_dev,
        _ => Decimal::ZERO,
    }
}

/// Divisor converting a group's average winning pnl into its "actual" R
/// multiple. A deliberate simplification the reports are calibrated to.
const ACTUAL_RR_DIVISOR: Decimal = Decimal::ONE_HUNDRED;

/// Actual-versus-target outcome per target risk:reward bucket, descending
/// by bucket size.
///
/// The target multiple is the segment after `:` in the ratio string (`"1:3"`
/// targets 3), defaulting to 1 when absent or unparseable. The actual
/// multiple is the group's average win pnl (losses counted as zero wins)
/// over the fixed divisor; efficiency is actual over target, in percent.
/// A zero target multiple yields zero efficiency.
pub fn rr_efficiency(trades: &[Trade]) -> Vec<RrEfficiency> {
    #[derive(Default)]
    struct Bucket {
        count: usize,
        wins: usize,
        win_pnl: Decimal,
    }

    let mut groups: HashMap<String, Bucket> = HashMap::new();
    for trade in trades {
        let bucket = groups.entry(trade.rr.clone()).or_default();
        bucket.count += 1;
        if trade.result.is_win() {
            bucket.wins += 1;
            bucket.win_pnl += trade.pnl;
        }
    }

    let mut stats: Vec<RrEfficiency> = groups
        .into_iter()
        .map(|(target_rr, bucket)| {
            let avg_win_pnl = bucket.win_pnl / Decimal::from(bucket.count);
            let actual = avg_win_pnl / ACTUAL_RR_DIVISOR;
            let target = parse_target_multiple(&target_rr);
            let efficiency = if target.is_zero() {
                Decimal::ZERO
            } else {
                actual / target * Decimal::ONE_HUNDRED
            };
            RrEfficiency {
                target_rr,
                count: bucket.count,
                wins: bucket.wins,
                avg_actual_rr: round2(actual),
                efficiency: round2(efficiency),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.target_rr.cmp(&b.target_rr)));
    stats
}

fn parse_target_multiple(rr: &str) -> Decimal {
    rr.split(':')
        .nth(1)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::trade;
    use core_types::TradeResult::{Loss, Win};
    use rust_decimal_macros::dec;

    #[test]
    fn win_rate_stays_in_bounds() {
        assert_eq!(win_rate(0, 0), Decimal::ZERO);
        assert_eq!(win_rate(0, 4), Decimal::ZERO);
        assert_eq!(win_rate(4, 4), dec!(100));
        assert_eq!(win_rate(1, 3).round_dp(2), dec!(33.33));
    }

    #[test]
    fn profit_factor_resolves_no_losses_to_zero() {
        assert_eq!(profit_factor(dec!(120), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(profit_factor(dec!(120), dec!(60)), dec!(2));
        // Magnitude: a signed average loss gives the same factor.
        assert_eq!(profit_factor(dec!(120), dec!(-60)), dec!(2));
    }

    #[test]
    fn expectancy_weights_wins_and_losses() {
        // 60% win rate, avg win 100, avg loss 50: 0.6*100 - 0.4*50 = 40.
        assert_eq!(expectancy(dec!(60), dec!(100), dec!(50)), dec!(40));
        assert_eq!(expectancy(Decimal::ZERO, dec!(100), dec!(50)), dec!(-50));
    }

    #[test]
    fn sharpe_is_zero_without_variance_or_data() {
        assert_eq!(sharpe_ratio(&[], Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            sharpe_ratio(&[dec!(5), dec!(5), dec!(5)], Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn sharpe_matches_hand_computed_series() {
        // Returns 10, -10: mean 0, population std dev 10.
        let sharpe = sharpe_ratio(&[dec!(10), dec!(-10)], Decimal::ZERO);
        assert_eq!(sharpe, Decimal::ZERO);

        // Returns 30, 10: mean 20, std dev 10, sharpe 2.
        let sharpe = sharpe_ratio(&[dec!(30), dec!(10)], Decimal::ZERO);
        assert_eq!(sharpe.round_dp(6), dec!(2));

        // A risk-free rate shifts the numerator.
        let sharpe = sharpe_ratio(&[dec!(30), dec!(10)], dec!(10));
        assert_eq!(sharpe.round_dp(6), dec!(1));
    }

    #[test]
    fn rr_efficiency_uses_the_fixed_divisor() {
        let mut t1 = trade(0, Win, dec!(300));
        t1.rr = "1:3".to_string();
        let mut t2 = trade(1, Loss, dec!(-100));
        t2.rr = "1:3".to_string();

        let stats = rr_efficiency(&[t1, t2]);
        assert_eq!(stats.len(), 1);
        let bucket = &stats[0];
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.wins, 1);
        // avg win pnl over the bucket = 300/2 = 150; actual = 150/100 = 1.5;
        // efficiency against a 3R target = 50%.
        assert_eq!(bucket.avg_actual_rr, dec!(1.5));
        assert_eq!(bucket.efficiency, dec!(50));
    }

    #[test]
    fn rr_buckets_order_by_count_descending() {
        let mut trades = Vec::new();
        for i in 0..3 {
            let mut t = trade(i, Win, dec!(100));
            t.rr = "1:2".to_string();
            trades.push(t);
        }
        let mut t = trade(3, Win, dec!(100));
        t.rr = "1:5".to_string();
        trades.push(t);

        let stats = rr_efficiency(&trades);
        assert_eq!(stats[0].target_rr, "1:2");
        assert_eq!(stats[1].target_rr, "1:5");
    }

    #[test]
    fn malformed_ratio_defaults_the_target_to_one() {
        let mut t = trade(0, Win, dec!(200));
        t.rr = "open".to_string();
        let stats = rr_efficiency(&[t]);
        // actual = 200/100 = 2 against a default 1R target.
        assert_eq!(stats[0].efficiency, dec!(200));
    }
}
