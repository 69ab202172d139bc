//! Test builders: Solr documents and `/select` response bodies.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// DocBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for one clique document as Solr returns it.
///
/// # Example
///
/// ```rust
/// let doc = DocBuilder::new("MONDO:0011561", "Alzheimer disease 6")
///     .names(&["Alzheimer disease 6", "AD6"])
///     .types(&["Disease"])
///     .clique_size(3)
///     .score(12.5)
///     .build();
/// ```
pub struct DocBuilder {
    fields: Map<String, Value>,
}

impl DocBuilder {
    /// A document whose `id` is the curie and whose only name is the label.
    pub fn new(curie: &str, preferred_name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(curie));
        fields.insert("curie".into(), json!(curie));
        fields.insert("preferred_name".into(), json!(preferred_name));
        fields.insert("names".into(), json!([preferred_name]));
        fields.insert("types".into(), json!(["NamedThing"]));
        fields.insert("clique_identifier_count".into(), json!(1));
        Self { fields }
    }

    pub fn id(self, id: &str) -> Self {
        self.set("id", json!(id))
    }

    pub fn names(self, names: &[&str]) -> Self {
        self.set("names", json!(names))
    }

    pub fn types(self, types: &[&str]) -> Self {
        self.set("types", json!(types))
    }

    pub fn taxa(self, taxa: &[&str]) -> Self {
        self.set("taxa", json!(taxa))
    }

    pub fn clique_size(self, n: u32) -> Self {
        self.set("clique_identifier_count", json!(n))
    }

    pub fn score(self, score: f64) -> Self {
        self.set("score", json!(score))
    }

    /// Remove a field entirely, to exercise defaulting.
    pub fn without(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// A `/select` body whose `numFound` equals the number of docs.
pub fn select_response(docs: Vec<Value>) -> Value {
    json!({
        "responseHeader": { "status": 0, "QTime": 1 },
        "response": { "numFound": docs.len(), "start": 0, "docs": docs }
    })
}

/// A count-only `/select` body, as returned for `limit: 0`.
pub fn count_response(num_found: u64) -> Value {
    json!({
        "responseHeader": { "status": 0, "QTime": 1 },
        "response": { "numFound": num_found, "start": 0, "docs": [] }
    })
}

/// Attach a highlighting section (`doc id -> field -> spans`) to a body.
pub fn with_highlighting(mut body: Value, highlighting: Value) -> Value {
    body["highlighting"] = highlighting;
    body
}
