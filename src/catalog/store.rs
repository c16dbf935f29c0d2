//! File-backed RDF/XML triple store.
//!
//! The catalog lives in a single RDF/XML document. Every read re-parses the
//! whole file into an in-memory oxigraph [`Graph`]; every write renders the
//! whole graph and replaces the file contents.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{Graph, Triple};

use super::error::{StoreError, StoreResult};
use super::predicates::{BOOKSTORE_NS, BOOKSTORE_PREFIX};

/// Accessor for the on-disk catalog document.
#[derive(Debug, Clone)]
pub struct TripleStore {
    path: PathBuf,
}

impl TripleStore {
    /// Create an accessor for the given file. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the catalog file fully into memory.
    pub fn load(&self) -> StoreResult<Graph> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound {
                path: self.path.display().to_string(),
            },
            _ => StoreError::Io {
                path: self.path.display().to_string(),
                source: e,
            },
        })?;
        let graph = parse_rdf_xml(BufReader::new(file), &self.path.display().to_string())?;
        tracing::debug!(path = %self.path.display(), triples = graph.len(), "catalog loaded");
        Ok(graph)
    }

    /// Overwrite the catalog file with the full contents of `graph`.
    ///
    /// The document is rendered in memory first, so a serialization failure
    /// leaves the existing file untouched.
    pub fn save(&self, graph: &Graph) -> StoreResult<()> {
        let bytes = serialize_rdf_xml(graph)?;
        std::fs::write(&self.path, bytes).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        tracing::debug!(path = %self.path.display(), triples = graph.len(), "catalog saved");
        Ok(())
    }

    /// Create an empty catalog file if none exists. Returns whether a file was created.
    pub fn init(&self) -> StoreResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        self.save(&Graph::new())?;
        tracing::info!(path = %self.path.display(), "created empty catalog");
        Ok(true)
    }
}

/// Parse a standalone RDF/XML document into a fresh graph.
///
/// `origin` names the document in error messages (a path or an upload name).
pub fn parse_rdf_xml(reader: impl Read, origin: &str) -> StoreResult<Graph> {
    let mut graph = Graph::new();
    for triple in parse_rdf_xml_triples(reader, origin)? {
        graph.insert(&triple);
    }
    Ok(graph)
}

/// Parse an RDF/XML document into its distinct triples, in document order.
///
/// Unlike a [`Graph`], the result enumerates the same way on every parse of
/// the same document.
pub fn parse_rdf_xml_triples(reader: impl Read, origin: &str) -> StoreResult<Vec<Triple>> {
    let mut seen = HashSet::new();
    let mut triples = Vec::new();
    for quad in RdfParser::from_format(RdfFormat::RdfXml).for_reader(reader) {
        let quad = quad.map_err(|e| StoreError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        let triple = Triple::from(quad);
        if seen.insert(triple.clone()) {
            triples.push(triple);
        }
    }
    Ok(triples)
}

/// Render a graph as an RDF/XML document with the `bs:` prefix bound.
pub fn serialize_rdf_xml(graph: &Graph) -> StoreResult<Vec<u8>> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::RdfXml)
        .with_prefix(BOOKSTORE_PREFIX, BOOKSTORE_NS)
        .map_err(|e| StoreError::Serialize {
            message: format!("invalid prefix IRI: {e}"),
        })?
        .for_writer(Vec::new());
    for triple in graph.iter() {
        serializer
            .serialize_triple(triple)
            .map_err(|e| StoreError::Serialize {
                message: e.to_string(),
            })?;
    }
    serializer.finish().map_err(|e| StoreError::Serialize {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{Literal, NamedNode};

    const DUNE: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:bs="http://example.org/bookstore#">
  <bs:Book rdf:about="http://example.org/bookstore#b1">
    <bs:hasTitle>Dune</bs:hasTitle>
  </bs:Book>
</rdf:RDF>"#;

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = TripleStore::new(dir.path().join("absent.rdf"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn parse_reads_typed_node_shorthand() {
        let graph = parse_rdf_xml(DUNE.as_bytes(), "inline").unwrap();
        assert_eq!(graph.len(), 2);
        let title = NamedNode::new("http://example.org/bookstore#hasTitle").unwrap();
        let b1 = NamedNode::new("http://example.org/bookstore#b1").unwrap();
        let expected = Triple::new(b1, title, Literal::new_simple_literal("Dune"));
        assert!(graph.contains(&expected));
    }

    #[test]
    fn parse_rejects_malformed_document() {
        let err = parse_rdf_xml("<rdf:RDF><unclosed>".as_bytes(), "upload").unwrap_err();
        match err {
            StoreError::Parse { origin, .. } => assert_eq!(origin, "upload"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn triples_keep_document_order_without_duplicates() {
        let doc = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:bs="http://example.org/bookstore#">
  <rdf:Description rdf:about="http://example.org/bookstore#b2">
    <bs:hasTitle>Emma</bs:hasTitle>
  </rdf:Description>
  <rdf:Description rdf:about="http://example.org/bookstore#b1">
    <bs:hasTitle>Dune</bs:hasTitle>
    <bs:hasTitle>Dune</bs:hasTitle>
  </rdf:Description>
</rdf:RDF>"#;
        let triples = parse_rdf_xml_triples(doc.as_bytes(), "inline").unwrap();
        let subjects: Vec<String> = triples.iter().map(|t| t.subject.to_string()).collect();
        assert_eq!(
            subjects,
            [
                "<http://example.org/bookstore#b2>",
                "<http://example.org/bookstore#b1>"
            ]
        );
    }

    #[test]
    fn save_then_load_preserves_triples() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = TripleStore::new(dir.path().join("books.rdf"));
        let graph = parse_rdf_xml(DUNE.as_bytes(), "inline").unwrap();
        store.save(&graph).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, graph);
    }

    #[test]
    fn init_creates_empty_catalog_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = TripleStore::new(dir.path().join("nested").join("books.rdf"));
        assert!(store.init().unwrap());
        assert!(store.load().unwrap().is_empty());

        let graph = parse_rdf_xml(DUNE.as_bytes(), "inline").unwrap();
        store.save(&graph).unwrap();
        assert!(!store.init().unwrap());
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
