//! Flatten an RDF graph into vis.js-style nodes and edges.
//!
//! Each triple contributes its subject and object as nodes (deduplicated by
//! rendered id within one conversion) and exactly one edge. A node keeps the
//! color of the role it was first seen in, so a resource first met as an
//! object stays yellow even when it later appears as a subject.

use std::collections::HashSet;

use oxigraph::model::{NamedOrBlankNodeRef, TermRef, TripleRef};
use serde::{Deserialize, Serialize};

use crate::iri::{local_name, short_label};

/// Color of nodes first seen as a subject.
pub const SUBJECT_COLOR: &str = "#97c2fc";
/// Color of nodes first seen as an object.
pub const OBJECT_COLOR: &str = "#ffff00";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub arrows: String,
}

/// Node and edge lists ready for a network renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisGraph {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

/// Convert every triple, in the order given.
///
/// Node colors depend on that order, so callers that need stable output pass
/// triples in document order (see [`parse_rdf_xml_triples`]) rather than
/// iterating a [`Graph`](oxigraph::model::Graph), whose enumeration order is
/// not fixed across parses.
///
/// [`parse_rdf_xml_triples`]: crate::catalog::parse_rdf_xml_triples
pub fn to_vis_graph<'a>(triples: impl IntoIterator<Item = TripleRef<'a>>) -> VisGraph {
    let mut out = VisGraph::default();
    let mut seen: HashSet<String> = HashSet::new();

    for triple in triples {
        let subject = render_subject(triple.subject);
        let object = render_term(triple.object);

        if seen.insert(subject.clone()) {
            out.nodes.push(node(&subject, SUBJECT_COLOR));
        }
        if seen.insert(object.clone()) {
            out.nodes.push(node(&object, OBJECT_COLOR));
        }
        out.edges.push(VisEdge {
            label: local_name(triple.predicate.as_str()).to_string(),
            from: subject,
            to: object,
            arrows: "to".to_string(),
        });
    }

    tracing::debug!(
        nodes = out.nodes.len(),
        edges = out.edges.len(),
        "graph converted for visualization"
    );
    out
}

fn node(id: &str, color: &str) -> VisNode {
    VisNode {
        id: id.to_string(),
        label: short_label(id).to_string(),
        color: color.to_string(),
    }
}

fn render_subject(subject: NamedOrBlankNodeRef<'_>) -> String {
    match subject {
        NamedOrBlankNodeRef::NamedNode(node) => node.as_str().to_string(),
        NamedOrBlankNodeRef::BlankNode(node) => node.to_string(),
    }
}

/// Bare IRI, `_:id`, lexical value, `value@lang`, or `value^^datatype`.
fn render_term(term: TermRef<'_>) -> String {
    match term {
        TermRef::NamedNode(node) => node.as_str().to_string(),
        TermRef::BlankNode(node) => node.to_string(),
        TermRef::Literal(literal) => {
            if let Some(language) = literal.language() {
                format!("{}@{language}", literal.value())
            } else if literal.is_plain() {
                literal.value().to_string()
            } else {
                format!("{}^^{}", literal.value(), literal.datatype().as_str())
            }
        }
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}
