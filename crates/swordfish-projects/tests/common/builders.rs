//! Builders for project records as the store pushes them.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

/// Builder for a single pushed project record.
pub struct ProjectBuilder {
    fields: Map<String, Value>,
}

impl ProjectBuilder {
    /// Create a new-status project with placeholder fields.
    pub fn new(id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), json!(id));
        fields.insert("description".to_string(), json!(format!("Project {}", id)));
        fields.insert("status".to_string(), json!(0));
        fields.insert("sourceLang".to_string(), json!("en"));
        fields.insert("targetLang".to_string(), json!("es"));
        fields.insert("creationString".to_string(), json!("2024-01-01"));
        Self { fields }
    }

    pub fn description(self, description: &str) -> Self {
        self.field("description", json!(description))
    }

    pub fn status(self, status: i64) -> Self {
        self.field("status", json!(status))
    }

    pub fn languages(self, source: &str, target: &str) -> Self {
        self.field("sourceLang", json!(source))
            .field("targetLang", json!(target))
    }

    pub fn created(self, created: &str) -> Self {
        self.field("creationString", json!(created))
    }

    pub fn finished(self, finished: &str) -> Self {
        self.field("finishDateString", json!(finished))
    }

    /// Set any raw field, including malformed values.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Remove a field entirely.
    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Push payload with one default record per id, in the given order.
pub fn snapshot_of(ids: &[&str]) -> Value {
    Value::Array(ids.iter().map(|id| ProjectBuilder::new(id).build()).collect())
}
