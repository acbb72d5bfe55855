use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to query the journal database: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Failed to decode a trade row: {0}")]
    InvalidRow(#[from] CoreError),
}
