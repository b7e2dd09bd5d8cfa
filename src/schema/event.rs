use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Newtype wrapper for event identifiers.
///
/// Upstream payloads carry ids as either strings or integers; both are
/// normalized to the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EventId(pub String);

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<EventId, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EventId(s),
            Raw::Number(n) => EventId(n.to_string()),
        })
    }
}

/// A dynamic value carried in task or reason parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Renders the value as plain text for embedding in a fact argument.
    pub fn as_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }
}

/// The computational task an event records: a name plus free-form
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

impl Task {
    /// Looks up a parameter and renders it as text.
    pub fn parameter(&self, key: &str) -> Option<String> {
        self.parameters.get(key).map(Value::as_text)
    }
}

/// Why the task was performed. Same shape as [`Task`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reason {
    pub name: String,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

impl Reason {
    pub fn parameter(&self, key: &str) -> Option<String> {
        self.parameters.get(key).map(Value::as_text)
    }
}

/// A structured record of one analysis step. Events are the sole input
/// to the report pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<EventId>,
    #[serde(default)]
    pub task: Option<Task>,
    #[serde(default)]
    pub reason: Option<Reason>,
}

impl Event {
    /// The id facts extracted from this event trace back to.
    ///
    /// Payload parsing assigns position-derived ids to events that arrive
    /// without one, so the fallback here only covers hand-built events.
    pub fn source_id(&self) -> EventId {
        self.id
            .clone()
            .unwrap_or_else(|| EventId("unknown".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_from_json_object() {
        let event: Event = serde_json::from_str(
            r#"{"id": "e1", "task": {"name": "Comparison", "parameters": {"facet": "topic"}}}"#,
        )
        .unwrap();
        assert_eq!(event.id, Some(EventId("e1".to_string())));
        let task = event.task.unwrap();
        assert_eq!(task.name, "Comparison");
        assert_eq!(task.parameter("facet"), Some("topic".to_string()));
        assert!(event.reason.is_none());
    }

    #[test]
    fn event_id_accepts_numbers() {
        let event: Event =
            serde_json::from_str(r#"{"id": 17, "reason": {"name": "small_collection"}}"#).unwrap();
        assert_eq!(event.id, Some(EventId("17".to_string())));
    }

    #[test]
    fn event_without_id_or_task() {
        let event: Event = serde_json::from_str(r#"{}"#).unwrap();
        assert!(event.id.is_none());
        assert!(event.task.is_none());
        assert!(event.reason.is_none());
        assert_eq!(event.source_id(), EventId("unknown".to_string()));
    }

    #[test]
    fn parameter_values_are_rendered_as_text() {
        let task: Task = serde_json::from_str(
            r#"{"name": "QueryTopicModel", "parameters": {"topics": 5, "weighted": true}}"#,
        )
        .unwrap();
        assert_eq!(task.parameter("topics"), Some("5".to_string()));
        assert_eq!(task.parameter("weighted"), Some("true".to_string()));
        assert_eq!(task.parameter("missing"), None);
    }
}
