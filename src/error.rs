use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("support ratio requested over an empty dataset")]
    EmptyDataset,

    #[error("item {0} is not in the encoder mapping")]
    UnknownItem(String),

    #[error("encoder was built from {expected} transactions but {found} were supplied")]
    TransactionCountMismatch { expected: usize, found: usize },

    #[error("support ratio {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = Error::TransactionCountMismatch {
            expected: 3,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "encoder was built from 3 transactions but 4 were supplied"
        );
        assert_eq!(
            Error::UnknownItem("\"milk\"".into()).to_string(),
            "item \"milk\" is not in the encoder mapping"
        );
    }
}
