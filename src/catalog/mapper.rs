//! Mapping between book records and RDF statements.
//!
//! A book is the subject `bs:<id>` carrying an `rdf:type bs:Book` triple plus
//! literal-valued `bs:hasTitle`, `bs:hasAuthor`, `bs:suitableForLevel` and
//! any number of `bs:hasTheme` triples.
//!
//! Title, author, and level have replace semantics; themes only accumulate.

use oxigraph::model::{
    Graph, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef, TripleRef,
};

use super::error::{BookError, BookResult};
use super::model::{BookDetail, BookInput, BookSummary};
use super::predicates::{BOOKSTORE_NS, BookPredicates, UNKNOWN};
use crate::iri::short_label;

/// Remove every whitespace character from a user-supplied id.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Translates book records to and from triples in a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct BookMapper {
    predicates: BookPredicates,
}

impl BookMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vocabulary this mapper writes.
    pub fn predicates(&self) -> &BookPredicates {
        &self.predicates
    }

    /// IRI of the book with the given (already sanitized) id.
    pub fn book_iri(&self, id: &str) -> BookResult<NamedNode> {
        NamedNode::new(format!("{BOOKSTORE_NS}{id}"))
            .map_err(|_| BookError::InvalidId { id: id.to_string() })
    }

    /// Create or update a book in `graph`. Returns the sanitized id.
    pub fn upsert(&self, graph: &mut Graph, input: &BookInput) -> BookResult<String> {
        let raw = input.id.as_deref().unwrap_or_default();
        let id = sanitize_id(raw);
        if id.is_empty() {
            return Err(BookError::MissingId);
        }
        let book = self.book_iri(&id)?;
        let book = book.as_ref();
        let p = &self.predicates;

        let type_triple = TripleRef::new(book, p.rdf_type(), p.book_class.as_ref());
        if !graph.contains(type_triple) {
            graph.insert(type_triple);
        }

        if let Some(title) = non_empty(&input.title) {
            replace_value(graph, book, p.has_title.as_ref(), title);
        }
        if let Some(author) = non_empty(&input.author) {
            replace_value(graph, book, p.has_author.as_ref(), author);
        }
        if let Some(theme) = non_empty(&input.theme) {
            graph.insert(TripleRef::new(
                book,
                p.has_theme.as_ref(),
                LiteralRef::new_simple_literal(theme),
            ));
        }
        if let Some(level) = non_empty(&input.level) {
            replace_value(graph, book, p.suitable_for_level.as_ref(), level);
        }

        Ok(id)
    }

    /// Look up one book. Only subjects typed `bs:Book` count as existing.
    pub fn get(&self, graph: &Graph, raw_id: &str) -> BookResult<BookDetail> {
        let id = sanitize_id(raw_id);
        let not_found = || BookError::NotFound {
            id: raw_id.to_string(),
        };
        if id.is_empty() {
            return Err(not_found());
        }
        let book = self.book_iri(&id).map_err(|_| not_found())?;
        let book = book.as_ref();
        if !self.is_book(graph, book) {
            return Err(not_found());
        }

        let p = &self.predicates;
        let theme = graph
            .objects_for_subject_predicate(book, p.has_theme.as_ref())
            .map(term_value)
            .collect::<Vec<_>>()
            .join(", ");

        Ok(BookDetail {
            title: first_value(graph, book, p.has_title.as_ref()),
            author: first_value(graph, book, p.has_author.as_ref()),
            level: first_value(graph, book, p.suitable_for_level.as_ref()),
            theme,
            id,
        })
    }

    /// All resources typed `bs:Book`, sorted by id.
    pub fn list(&self, graph: &Graph) -> Vec<BookSummary> {
        let p = &self.predicates;
        let mut books: Vec<BookSummary> = graph
            .subjects_for_predicate_object(p.rdf_type(), p.book_class.as_ref())
            .filter_map(|subject| match subject {
                NamedOrBlankNodeRef::NamedNode(node) => Some(node),
                _ => None,
            })
            .map(|book| BookSummary {
                id: short_label(book.as_str()).to_string(),
                title: first_value(graph, book, p.has_title.as_ref()),
                author: first_value(graph, book, p.has_author.as_ref()),
            })
            .collect();
        books.sort_by(|a, b| a.id.cmp(&b.id));
        books
    }

    fn is_book(&self, graph: &Graph, book: NamedNodeRef<'_>) -> bool {
        graph.contains(TripleRef::new(
            book,
            self.predicates.rdf_type(),
            self.predicates.book_class.as_ref(),
        ))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn replace_value(graph: &mut Graph, book: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>, value: &str) {
    let stale: Vec<Term> = graph
        .objects_for_subject_predicate(book, predicate)
        .map(TermRef::into_owned)
        .collect();
    for object in &stale {
        graph.remove(TripleRef::new(book, predicate, object.as_ref()));
    }
    graph.insert(TripleRef::new(
        book,
        predicate,
        LiteralRef::new_simple_literal(value),
    ));
}

fn first_value(graph: &Graph, book: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>) -> String {
    graph
        .object_for_subject_predicate(book, predicate)
        .map(term_value)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Lexical value of a literal, or the identifier of a node.
fn term_value(term: TermRef<'_>) -> String {
    match term {
        TermRef::Literal(literal) => literal.value().to_string(),
        TermRef::NamedNode(node) => node.as_str().to_string(),
        TermRef::BlankNode(node) => node.as_str().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}
