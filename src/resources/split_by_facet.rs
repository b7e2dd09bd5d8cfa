use crate::core::slots::SlotRuleSpec;
use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: The documents were divided into groups {parameters} .
fi: Aineisto jaettiin ryhmiin {parameters} .
| name = SplitByFacet
";

const SLOT_RULES: &[SlotRuleSpec] = &[
    SlotRuleSpec {
        language: "en",
        pattern: r"\[SplitByFacet:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "based on the values of the facet '{}'",
    },
    SlotRuleSpec {
        language: "en",
        pattern: r"\[SplitByFacet:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[SplitByFacet:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "'{}' arvojen perusteella",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[SplitByFacet:Task:Unknown\]",
        groups: &[],
        output: "",
    },
];

pub struct SplitByFacetResource;

impl Resource for SplitByFacetResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }

    fn slot_rules(&self) -> Vec<SlotRuleSpec> {
        SLOT_RULES.to_vec()
    }
}

impl TaskResource for SplitByFacetResource {
    fn task_name(&self) -> &'static str {
        "SplitByFacet"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "SplitByFacet" {
            return Vec::new();
        }

        let params = match task.parameter("facet") {
            Some(facet) => format!("[SplitByFacet:Task:Facet:{}]", facet),
            None => "[SplitByFacet:Task:Unknown]".to_string(),
        };

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "SplitByFacet",
            Some(params),
            event.source_id(),
        ))]
    }
}
