//! Equity curve and drawdown.

use crate::report::EquityPoint;
use crate::round::round2;
use core_types::Trade;
use rust_decimal::Decimal;

/// Running cumulative P&L, one point per trade.
///
/// Expects trades ordered ascending by timestamp. The accumulator stays
/// unrounded; each emitted point is rounded to 2 decimal places.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut cumulative = Decimal::ZERO;
    trades
        .iter()
        .map(|trade| {
            cumulative += trade.pnl;
            EquityPoint {
                timestamp: trade.timestamp,
                cumulative_pnl: round2(cumulative),
            }
        })
        .collect()
}

/// Maximum percentage decline from a running peak across an equity curve.
///
/// The peak starts at the first element. While the running peak is zero or
/// negative the percentage formula is undefined, so those points contribute
/// zero drawdown rather than NaN or infinity. Empty input yields zero.
pub fn max_drawdown(curve: &[Decimal]) -> Decimal {
    let Some(&first) = curve.first() else {
        return Decimal::ZERO;
    };

    let mut peak = first;
    let mut max_dd = Decimal::ZERO;

    for &value in curve {
        if value > peak {
            peak = value;
        }
        if peak <= Decimal::ZERO {
            continue;
        }
        let drawdown = (peak - value) / peak * Decimal::ONE_HUNDRED;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }

    round2(max_dd)
}
