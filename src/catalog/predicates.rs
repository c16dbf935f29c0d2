//! Well-known `bs:*` vocabulary for book records.
//!
//! The namespace and predicate names are fixed; every book resource and
//! property IRI is built from [`BOOKSTORE_NS`].

use oxigraph::model::vocab::rdf;
use oxigraph::model::{NamedNode, NamedNodeRef};

/// IRI namespace for book resources and properties.
pub const BOOKSTORE_NS: &str = "http://example.org/bookstore#";

/// Prefix bound to [`BOOKSTORE_NS`] when the catalog is serialized.
pub const BOOKSTORE_PREFIX: &str = "bs";

/// Value reported for a scalar field that has no triple.
pub const UNKNOWN: &str = "Unknown";

/// Resolved predicate and class IRIs used by the book mapper.
#[derive(Debug, Clone)]
pub struct BookPredicates {
    pub has_title: NamedNode,
    pub has_author: NamedNode,
    pub has_theme: NamedNode,
    pub suitable_for_level: NamedNode,
    /// The `bs:Book` class asserted with `rdf:type`.
    pub book_class: NamedNode,
}

impl BookPredicates {
    /// Build the fixed vocabulary.
    pub fn new() -> Self {
        Self {
            has_title: ns("hasTitle"),
            has_author: ns("hasAuthor"),
            has_theme: ns("hasTheme"),
            suitable_for_level: ns("suitableForLevel"),
            book_class: ns("Book"),
        }
    }

    /// `rdf:type`.
    pub fn rdf_type(&self) -> NamedNodeRef<'static> {
        rdf::TYPE
    }
}

impl Default for BookPredicates {
    fn default() -> Self {
        Self::new()
    }
}

// Local names are static ASCII identifiers, always a valid IRI suffix.
fn ns(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{BOOKSTORE_NS}{local}"))
}
