use serde::{Deserialize, Serialize};

use super::event::EventId;

/// The broad kind of claim a fact makes: what was done, or why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactCategory {
    Task,
    Reason,
}

impl FactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Reason => "reason",
        }
    }
}

/// A typed, atomic claim extracted from an event.
///
/// The argument is an opaque string payload that may embed placeholder
/// tokens (`[Category:Name:Key:Value]`) for later slot realization.
/// Facts are immutable once created; every fact keeps the id of the
/// event it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub category: FactCategory,
    pub name: String,
    pub argument: Option<String>,
    pub source: EventId,
}

impl Fact {
    pub fn new(
        category: FactCategory,
        name: impl Into<String>,
        argument: Option<String>,
        source: EventId,
    ) -> Fact {
        Fact {
            category,
            name: name.into(),
            argument,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_category_strings() {
        assert_eq!(FactCategory::Task.as_str(), "task");
        assert_eq!(FactCategory::Reason.as_str(), "reason");
    }

    #[test]
    fn fact_keeps_source_event() {
        let fact = Fact::new(
            FactCategory::Task,
            "ExtractFacets",
            None,
            EventId("e1".to_string()),
        );
        assert_eq!(fact.source, EventId("e1".to_string()));
        assert_eq!(fact.name, "ExtractFacets");
        assert!(fact.argument.is_none());
    }
}
