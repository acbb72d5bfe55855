use chrono::{Duration, TimeZone, Utc};
use core_types::{NO_MISTAKE, Trade, TradeResult, TradeType};
use rust_decimal::Decimal;

/// Builds a minimal trade for tests; `seq` spaces timestamps one hour apart
/// so ascending-order inputs are easy to construct.
pub fn trade(seq: i64, result: TradeResult, pnl: Decimal) -> Trade {
    let base = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
    Trade {
        id: seq,
        user_id: 1,
        timestamp: base + Duration::hours(seq),
        session: "London".to_string(),
        strategy: "Breakout".to_string(),
        result,
        pnl,
        rr: "1:2".to_string(),
        mistake: NO_MISTAKE.to_string(),
        emotion: None,
        screenshot_url: None,
        trade_type: TradeType::Live,
        setup_grade: None,
        log_date: None,
        entry_time: None,
    }
}

/// Shorthand for a run of results with an arbitrary fixed pnl per result kind.
pub fn trades_from_results(results: &[TradeResult]) -> Vec<Trade> {
    results
        .iter()
        .enumerate()
        .map(|(i, &result)| {
            let pnl = match result {
                TradeResult::Win => Decimal::new(100, 0),
                TradeResult::Loss => Decimal::new(-50, 0),
                TradeResult::Breakeven => Decimal::ZERO,
            };
            trade(i as i64, result, pnl)
        })
        .collect()
}
