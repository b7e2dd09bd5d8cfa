use super::event::EventId;
use super::fact::{Fact, FactCategory};

/// One or more facts bundled as a single reportable unit, plus the
/// salience score the document planner selects and orders by.
///
/// The message is the unit the planner keeps or drops; its facts are
/// realized together as one sentence group.
#[derive(Debug, Clone)]
pub struct Message {
    facts: Vec<Fact>,
    pub importance: f64,
}

impl Message {
    /// Bundles a single fact with the default salience for its category:
    /// task claims outrank reason claims.
    pub fn new(fact: Fact) -> Message {
        let importance = match fact.category {
            FactCategory::Task => 10.0,
            FactCategory::Reason => 5.0,
        };
        Message {
            facts: vec![fact],
            importance,
        }
    }

    /// Bundles a single fact with an explicit salience score. Catch-all
    /// resources use this to rank their boilerplate below real content.
    pub fn with_importance(fact: Fact, importance: f64) -> Message {
        Message {
            facts: vec![fact],
            importance,
        }
    }

    /// Appends a further fact to this reportable unit.
    pub fn push_fact(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// The fact whose category and name drive planning decisions.
    pub fn main_fact(&self) -> &Fact {
        &self.facts[0]
    }

    /// True if any of this message's facts came from the given event.
    pub fn mentions_event(&self, id: &EventId) -> bool {
        self.facts.iter().any(|f| &f.source == id)
    }
}

/// One node of the document plan: a message plus the messages
/// rhetorically subordinate to it (a reason under the task it explains).
#[derive(Debug, Clone)]
pub struct PlanNode {
    pub message: Message,
    pub children: Vec<PlanNode>,
}

impl PlanNode {
    pub fn leaf(message: Message) -> PlanNode {
        PlanNode {
            message,
            children: Vec::new(),
        }
    }
}

/// The ordered, possibly nested sequence of messages chosen for the
/// report. Built and consumed within a single pipeline run.
#[derive(Debug, Clone, Default)]
pub struct DocumentPlan {
    pub nodes: Vec<PlanNode>,
}

impl DocumentPlan {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of messages in the plan, children included.
    pub fn len(&self) -> usize {
        fn count(nodes: &[PlanNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.nodes)
    }
}
