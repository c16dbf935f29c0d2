//! Book catalog stored as RDF triples in a single RDF/XML file.
//!
//! [`Catalog`] runs each operation as a full cycle against the file: load the
//! document, read or mutate the in-memory graph through [`BookMapper`], and
//! for writes, save the whole graph back.
//!
//! Write cycles are serialized within the process so concurrent upserts do
//! not overwrite each other. Other processes writing the same file are not
//! coordinated with.

pub mod error;
pub mod mapper;
pub mod model;
pub mod predicates;
pub mod store;

use std::path::PathBuf;
use std::sync::Mutex;

pub use error::{BookError, BookResult, StoreError, StoreResult};
pub use mapper::{BookMapper, sanitize_id};
pub use model::{BookDetail, BookInput, BookSummary};
pub use predicates::{BOOKSTORE_NS, BookPredicates, UNKNOWN};
pub use store::{TripleStore, parse_rdf_xml, parse_rdf_xml_triples, serialize_rdf_xml};

/// File-backed book catalog.
#[derive(Debug)]
pub struct Catalog {
    store: TripleStore,
    mapper: BookMapper,
    write_lock: Mutex<()>,
}

impl Catalog {
    /// Open a catalog over the given RDF/XML file. The file is not read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: TripleStore::new(path),
            mapper: BookMapper::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying file accessor.
    pub fn store(&self) -> &TripleStore {
        &self.store
    }

    /// Create an empty catalog file if none exists.
    pub fn init(&self) -> StoreResult<bool> {
        self.store.init()
    }

    /// Create or update a book and persist the catalog. Returns the sanitized id.
    pub fn add_book(&self, input: &BookInput) -> BookResult<String> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut graph = self.store.load()?;
        let id = self.mapper.upsert(&mut graph, input)?;
        self.store.save(&graph)?;
        tracing::info!(id = %id, triples = graph.len(), "book saved");
        Ok(id)
    }

    /// All books in the catalog, sorted by id.
    pub fn list_books(&self) -> BookResult<Vec<BookSummary>> {
        let graph = self.store.load()?;
        Ok(self.mapper.list(&graph))
    }

    /// Full detail for one book.
    pub fn get_book(&self, id: &str) -> BookResult<BookDetail> {
        let graph = self.store.load()?;
        self.mapper.get(&graph, id)
    }

    /// Number of books in the catalog.
    pub fn book_count(&self) -> BookResult<usize> {
        self.list_books().map(|books| books.len())
    }
}
