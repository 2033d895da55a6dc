use serde_json::{Map, Value};

/// An issue as reported by the tracker. `status` is the current workflow
/// state name; `fields` carries the tracker's native field map so callers
/// can inspect custom fields without this crate modeling them.
#[derive(Debug, Clone)]
pub struct Issue {
    pub key: String,
    pub status: String,
    pub fields: Map<String, Value>,
}

/// A workflow transition offered by the tracker for an issue's current
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

/// Request to create a new tracker issue. All metadata values are opaque
/// strings validated only by the tracker itself.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub labels: Vec<String>,
    pub priority: String,
}
