use crate::core::slots::SlotRuleSpec;
use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: The documents were matched against {parameters} .
fi: Aineisto yhdistettiin {parameters} .
| name = QueryTopicModel
";

// The topic-count rule emits a numeral token; the morphological pass
// spells it out where the language has a spelling table.
const SLOT_RULES: &[SlotRuleSpec] = &[
    SlotRuleSpec {
        language: "en",
        pattern: r"\[QueryTopicModel:Task:Topics:(\d+)\]",
        groups: &[0],
        output: "a topic model with [CARDINAL:{}] topics",
    },
    SlotRuleSpec {
        language: "en",
        pattern: r"\[QueryTopicModel:Task:Unknown\]",
        groups: &[],
        output: "a pre-trained topic model",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[QueryTopicModel:Task:Topics:(\d+)\]",
        groups: &[0],
        output: "aihemalliin, jossa on [CARDINAL:{}] aihetta",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[QueryTopicModel:Task:Unknown\]",
        groups: &[],
        output: "esikoulutettuun aihemalliin",
    },
];

pub struct QueryTopicModelResource;

impl Resource for QueryTopicModelResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }

    fn slot_rules(&self) -> Vec<SlotRuleSpec> {
        SLOT_RULES.to_vec()
    }
}

impl TaskResource for QueryTopicModelResource {
    fn task_name(&self) -> &'static str {
        "QueryTopicModel"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "QueryTopicModel" {
            return Vec::new();
        }

        let params = match task.parameter("topics") {
            Some(count) => format!("[QueryTopicModel:Task:Topics:{}]", count),
            None => "[QueryTopicModel:Task:Unknown]".to_string(),
        };

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "QueryTopicModel",
            Some(params),
            event.source_id(),
        ))]
    }
}
