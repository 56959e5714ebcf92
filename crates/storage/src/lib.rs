#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use liftlog_domain::AliasError;

pub mod file;
pub mod records;

pub use records::{Emitter, IdOffsets, Record, Records};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid alias table: {0}")]
    Alias(#[from] AliasError),
    #[error("identifiers for {0} exhausted")]
    IdOverflow(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_io_error() {
        let error = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "foo"));
        assert!(matches!(&error, Error::Io(err) if err.kind() == std::io::ErrorKind::NotFound));
        assert_eq!(error.to_string(), "foo");
    }

    #[test]
    fn test_error_from_alias_error() {
        assert!(matches!(
            Error::from(AliasError::InvalidMonth(13)),
            Error::Alias(AliasError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_error_id_overflow_display() {
        assert_eq!(
            Error::IdOverflow("logged_sets").to_string(),
            "identifiers for logged_sets exhausted"
        );
    }
}
