//! Helpers for turning IRIs into human-readable labels.

/// Substring after the last `#`, or the whole string when there is none.
///
/// Applied uniformly to IRIs and rendered literals.
pub fn short_label(s: &str) -> &str {
    match s.rfind('#') {
        Some(pos) => &s[pos + 1..],
        None => s,
    }
}

/// Local name of a predicate IRI: after the last `#`, else after the last `/`.
pub fn local_name(iri: &str) -> &str {
    if let Some(pos) = iri.rfind('#') {
        return &iri[pos + 1..];
    }
    match iri.rfind('/') {
        Some(pos) => &iri[pos + 1..],
        None => iri,
    }
}
