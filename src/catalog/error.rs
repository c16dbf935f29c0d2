//! Rich diagnostic error types for the book catalog.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from reading or writing the RDF/XML catalog file.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("catalog file not found: {path}")]
    #[diagnostic(
        code(bookstore::store::not_found),
        help(
            "The catalog file does not exist yet. Create an empty one with \
             `bookstore init`, or point `store_path` at an existing RDF/XML file."
        )
    )]
    NotFound { path: String },

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(bookstore::store::io),
        help(
            "A filesystem operation failed. Check that the directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("RDF/XML parse error in {origin}: {message}")]
    #[diagnostic(
        code(bookstore::store::parse),
        help("The document is not valid RDF/XML. Validate it with an RDF tool and retry.")
    )]
    Parse { origin: String, message: String },

    #[error("RDF/XML serialization error: {message}")]
    #[diagnostic(
        code(bookstore::store::serialize),
        help("The graph could not be written as RDF/XML. The catalog file was left untouched.")
    )]
    Serialize { message: String },
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors from mapping books to and from triples.
#[derive(Debug, Error, Diagnostic)]
pub enum BookError {
    #[error("Book ID is required.")]
    #[diagnostic(
        code(bookstore::book::missing_id),
        help("Provide a non-empty `id`. Whitespace is stripped before the ID is used.")
    )]
    MissingId,

    #[error("invalid book id: \"{id}\"")]
    #[diagnostic(
        code(bookstore::book::invalid_id),
        help(
            "The ID must form a valid IRI when appended to the bookstore namespace. \
             Avoid characters such as `<`, `>`, `\"`, `{{`, `}}`, `|`, `^` and backticks."
        )
    )]
    InvalidId { id: String },

    #[error("book not found: \"{id}\"")]
    #[diagnostic(
        code(bookstore::book::not_found),
        help("No book with this ID exists in the catalog. List books with `bookstore list`.")
    )]
    NotFound { id: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for book operation results.
pub type BookResult<T> = std::result::Result<T, BookError>;

impl BookError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingId | Self::InvalidId { .. })
    }
}
