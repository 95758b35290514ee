use thiserror::Error;

use crate::validator::QueryError;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: {source}")]
    InvalidQuery {
        row: usize,
        #[source]
        source: QueryError,
    },

    #[error("row {row}: rating {value} is outside 1-5")]
    InvalidRating { row: usize, value: u8 },
}
