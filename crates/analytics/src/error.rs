use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error(
        "Trade sequence is not ordered ascending by timestamp (trade {0} precedes its predecessor)"
    )]
    UnsortedInput(i64),
}
