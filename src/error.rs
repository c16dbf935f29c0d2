//! Top-level diagnostic error type for the bookstore.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives; this enum wraps them so binaries can report any failure with its
//! code and help text intact.

use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::{BookError, StoreError};
use crate::config::ConfigError;
use crate::notify::NotifyError;

#[derive(Debug, Error, Diagnostic)]
pub enum BookstoreError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Book(#[from] BookError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Notify(#[from] NotifyError),

    #[error("cannot read {path}: {source}")]
    #[diagnostic(code(bookstore::io), help("Check that the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode output as JSON: {0}")]
    #[diagnostic(code(bookstore::output))]
    Output(#[from] serde_json::Error),
}

/// Convenience alias for functions returning bookstore results.
pub type BookstoreResult<T> = std::result::Result<T, BookstoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_error_converts_to_bookstore_error() {
        let err: BookstoreError = BookError::MissingId.into();
        assert!(matches!(err, BookstoreError::Book(BookError::MissingId)));
    }

    #[test]
    fn diagnostic_code_survives_wrapping() {
        let err: BookstoreError = StoreError::NotFound {
            path: "books_data.rdf".into(),
        }
        .into();
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bookstore::store::not_found"));
        assert!(err.to_string().contains("books_data.rdf"));
    }

    #[test]
    fn missing_input_file_has_io_code() {
        let err = BookstoreError::Io {
            path: "graph.rdf".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bookstore::io"));
        assert!(err.to_string().starts_with("cannot read graph.rdf"));
    }
}
