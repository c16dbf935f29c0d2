//! Benchmarks for RDF-to-visualization conversion and catalog parsing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use oxigraph::model::Graph;

use rdf_bookstore::catalog::{BookInput, BookMapper, parse_rdf_xml, serialize_rdf_xml};
use rdf_bookstore::visualize::to_vis_graph;

fn catalog_graph(books: usize) -> Graph {
    let mapper = BookMapper::new();
    let mut graph = Graph::new();
    for i in 0..books {
        let input = BookInput::new(format!("book{i}"))
            .with_title(format!("Title {i}"))
            .with_author(format!("Author {}", i % 50))
            .with_theme(format!("theme{}", i % 20))
            .with_level("B1");
        mapper.upsert(&mut graph, &input).unwrap();
    }
    graph
}

fn bench_to_vis_graph(c: &mut Criterion) {
    let graph = catalog_graph(1_000);
    c.bench_function("to_vis_graph_1k_books", |bench| {
        bench.iter(|| black_box(to_vis_graph(&graph)))
    });
}

fn bench_parse_rdf_xml(c: &mut Criterion) {
    let doc = serialize_rdf_xml(&catalog_graph(1_000)).unwrap();
    c.bench_function("parse_rdf_xml_1k_books", |bench| {
        bench.iter(|| black_box(parse_rdf_xml(&doc[..], "bench").unwrap()))
    });
}

criterion_group!(benches, bench_to_vis_graph, bench_parse_rdf_xml);
criterion_main!(benches);
