//! Project records pushed by the project store.
//!
//! The store sends untyped JSON. [`Project::from_value`] is the one place
//! where that payload is coerced into a typed record; rendering never looks
//! at raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of a translation project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    New,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Maps a wire status code. Only 0 and 1 are distinguished; every other
    /// value, including 2, is reported as completed.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ProjectStatus::New,
            1 => ProjectStatus::InProgress,
            _ => ProjectStatus::Completed,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ProjectStatus::New => 0,
            ProjectStatus::InProgress => 1,
            ProjectStatus::Completed => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::New => "New",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A translation project as displayed by the list view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier, unique among displayed projects.
    pub id: String,
    pub description: String,
    pub status: ProjectStatus,
    pub source_lang: String,
    pub target_lang: String,
    /// Pre-formatted creation timestamp, shown verbatim.
    pub creation_string: String,
    /// Pre-formatted completion timestamp; `None` while not completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_date_string: Option<String>,
}

impl Project {
    /// Coerces one pushed record. Never fails: missing or mistyped fields
    /// fall back to empty strings, unknown status codes to `Completed`.
    pub fn from_value(value: &Value) -> Self {
        let id = match value.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            other => {
                log::debug!("Project record has unusable id {:?}, using empty id", other);
                String::new()
            }
        };

        let status = match value.get("status").and_then(status_code) {
            Some(code) => ProjectStatus::from_code(code),
            None => {
                log::debug!(
                    "Project {} has non-integral status {:?}, defaulting to Completed",
                    id,
                    value.get("status")
                );
                ProjectStatus::Completed
            }
        };

        let finish_date_string =
            Some(string_field(value, "finishDateString", &id)).filter(|s| !s.is_empty());

        Self {
            description: string_field(value, "description", &id),
            status,
            source_lang: string_field(value, "sourceLang", &id),
            target_lang: string_field(value, "targetLang", &id),
            creation_string: string_field(value, "creationString", &id),
            finish_date_string,
            id,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.finish_date_string.is_some()
    }
}

/// Integral status code. Whole floats such as `1.0` count.
fn status_code(value: &Value) -> Option<i64> {
    if let Some(code) = value.as_i64() {
        return Some(code);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

fn string_field(value: &Value, key: &str, project_id: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            log::debug!(
                "Project {} field '{}' is not a string ({}), rendering as text",
                project_id,
                key,
                other
            );
            other.to_string()
        }
    }
}

/// An ordered, complete set of projects as pushed by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSnapshot {
    projects: Vec<Project>,
}

impl ProjectSnapshot {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Coerces a push payload. Anything but an array is logged and read as
    /// an empty snapshot.
    pub fn from_payload(payload: &Value) -> Self {
        match payload {
            Value::Array(items) => Self {
                projects: items.iter().map(Project::from_value).collect(),
            },
            other => {
                log::warn!(
                    "Projects push is not an array ({}), showing no projects",
                    json_kind(other)
                );
                Self::default()
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }
}

impl From<Vec<Project>> for ProjectSnapshot {
    fn from(projects: Vec<Project>) -> Self {
        Self::new(projects)
    }
}

impl<'a> IntoIterator for &'a ProjectSnapshot {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_all_fields() {
        let p = Project::from_value(&json!({
            "id": "2",
            "description": "Job B",
            "status": 2,
            "sourceLang": "EN",
            "targetLang": "FR",
            "creationString": "2024-01-02",
            "finishDateString": "2024-02-01"
        }));

        assert_eq!(p.id, "2");
        assert_eq!(p.description, "Job B");
        assert_eq!(p.status, ProjectStatus::Completed);
        assert_eq!(p.source_lang, "EN");
        assert_eq!(p.target_lang, "FR");
        assert_eq!(p.creation_string, "2024-01-02");
        assert_eq!(p.finish_date_string.as_deref(), Some("2024-02-01"));
        assert!(p.is_completed());
    }

    #[test]
    fn test_from_value_missing_fields_are_empty() {
        let p = Project::from_value(&json!({ "id": "x", "status": 0 }));
        assert_eq!(p.description, "");
        assert_eq!(p.source_lang, "");
        assert_eq!(p.creation_string, "");
        assert_eq!(p.finish_date_string, None);
        assert_eq!(p.status, ProjectStatus::New);
    }

    #[test]
    fn test_from_value_numeric_id_is_stringified() {
        let p = Project::from_value(&json!({ "id": 42, "status": 1 }));
        assert_eq!(p.id, "42");
        assert_eq!(p.status, ProjectStatus::InProgress);
    }

    #[test]
    fn test_from_value_empty_finish_date_is_none() {
        let p = Project::from_value(&json!({ "id": "1", "finishDateString": "" }));
        assert_eq!(p.finish_date_string, None);
    }

    #[test]
    fn test_from_value_non_integer_status_is_completed() {
        for status in [json!("1"), json!(null), json!(1.5), json!({})] {
            let p = Project::from_value(&json!({ "id": "1", "status": status.clone() }));
            assert_eq!(p.status, ProjectStatus::Completed, "status {:?}", status);
        }
    }

    #[test]
    fn test_from_value_whole_float_status_maps_like_integer() {
        for (status, expected) in [
            (json!(0.0), ProjectStatus::New),
            (json!(1.0), ProjectStatus::InProgress),
            (json!(-0.0), ProjectStatus::New),
            (json!(2.0), ProjectStatus::Completed),
            (json!(1e300), ProjectStatus::Completed),
        ] {
            let p = Project::from_value(&json!({ "id": "1", "status": status.clone() }));
            assert_eq!(p.status, expected, "status {:?}", status);
        }
    }

    #[test]
    fn test_status_from_code_fallback() {
        assert_eq!(ProjectStatus::from_code(0), ProjectStatus::New);
        assert_eq!(ProjectStatus::from_code(1), ProjectStatus::InProgress);
        assert_eq!(ProjectStatus::from_code(2), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::from_code(5), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::from_code(-1), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn test_snapshot_keeps_payload_order() {
        let snapshot = ProjectSnapshot::from_payload(&json!([
            { "id": "b", "status": 0 },
            { "id": "a", "status": 0 }
        ]));
        let ids: Vec<&str> = snapshot.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_snapshot_non_array_is_empty() {
        assert!(ProjectSnapshot::from_payload(&json!({ "id": "1" })).is_empty());
        assert!(ProjectSnapshot::from_payload(&Value::Null).is_empty());
    }
}
