//! Book data types exchanged with the catalog.

use serde::{Deserialize, Serialize};

/// Fields submitted for a book upsert.
///
/// Every field is optional at the wire level; an empty string means "leave
/// unchanged" for title, author, theme, and level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl BookInput {
    /// Start an input for the given raw id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// One entry of the book listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Local name of the book IRI.
    pub id: String,
    pub title: String,
    pub author: String,
}

/// Full detail for a single book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetail {
    pub id: String,
    pub title: String,
    pub author: String,
    pub level: String,
    /// All themes joined with `", "`; empty when the book has none.
    pub theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_accepts_partial_payload() {
        let input: BookInput =
            serde_json::from_str(r#"{"id":"b1","title":"Dune","extra":1}"#).unwrap();
        assert_eq!(input, BookInput::new("b1").with_title("Dune"));
    }

    #[test]
    fn input_accepts_null_fields() {
        let input: BookInput = serde_json::from_str(r#"{"id":null,"theme":"sf"}"#).unwrap();
        assert!(input.id.is_none());
        assert_eq!(input.theme.as_deref(), Some("sf"));
    }
}
