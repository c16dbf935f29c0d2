// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # rdf-bookstore
//!
//! A small REST backend that keeps book metadata as RDF triples in a single
//! RDF/XML file and turns arbitrary RDF/XML documents into node/edge graphs
//! for visualization.
//!
//! ## Architecture
//!
//! - **Catalog** (`catalog`): file-backed triple store plus the book mapper
//!   (`bs:hasTitle`, `bs:hasAuthor`, `bs:hasTheme`, `bs:suitableForLevel`)
//! - **Visualization** (`visualize`): RDF graph to vis.js `{nodes, edges}`
//! - **Notification** (`notify`): best-effort POST to the chatbot service
//! - **HTTP API** (`server`, feature `server`): axum router over the above
//!
//! ## Library usage
//!
//! ```no_run
//! use rdf_bookstore::catalog::{BookInput, Catalog};
//!
//! let catalog = Catalog::new("books_data.rdf");
//! catalog.init().unwrap();
//! catalog
//!     .add_book(&BookInput::new("dune").with_title("Dune").with_theme("desert"))
//!     .unwrap();
//! let detail = catalog.get_book("dune").unwrap();
//! assert_eq!(detail.title, "Dune");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod iri;
pub mod notify;
#[cfg(feature = "server")]
pub mod server;
pub mod visualize;
