use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary or percentage figure to 2 decimal places, half away
/// from zero. Applied only at output boundaries; intermediate accumulators
/// stay unrounded so chained computations do not compound rounding error.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
