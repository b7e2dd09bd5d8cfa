use crate::core::slots::SlotRuleSpec;
use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: Two corpora were compared {parameters} .
fi: Kahta kokoelmaa verrattiin {parameters} .
de: Zwei Korpora wurden {parameters} verglichen.
fr: Deux corpus ont été comparés {parameters}.
| name = Comparison
";

const SLOT_RULES: &[SlotRuleSpec] = &[
    SlotRuleSpec {
        language: "en",
        pattern: r"\[Comparison:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "based on the facet '{}'",
    },
    SlotRuleSpec {
        language: "en",
        pattern: r"\[Comparison:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[Comparison:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "'{}' arvojen osalta",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[Comparison:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "de",
        pattern: r"\[Comparison:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "basierend auf der Such-Facette '{}'",
    },
    SlotRuleSpec {
        language: "de",
        pattern: r"\[Comparison:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "fr",
        pattern: r"\[Comparison:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "sur la base de la facette «{}»",
    },
    SlotRuleSpec {
        language: "fr",
        pattern: r"\[Comparison:Task:Unknown\]",
        groups: &[],
        output: "",
    },
];

pub struct ComparisonResource;

impl Resource for ComparisonResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }

    fn slot_rules(&self) -> Vec<SlotRuleSpec> {
        SLOT_RULES.to_vec()
    }
}

impl TaskResource for ComparisonResource {
    fn task_name(&self) -> &'static str {
        "Comparison"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "Comparison" {
            return Vec::new();
        }

        let params = match task.parameter("facet") {
            Some(facet) => format!("[Comparison:Task:Facet:{}]", facet),
            None => "[Comparison:Task:Unknown]".to_string(),
        };

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "Comparison",
            Some(params),
            event.source_id(),
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::event::{EventId, Task, Value};
    use std::collections::HashMap;

    fn comparison_event(facet: Option<&str>) -> Event {
        let mut parameters = HashMap::new();
        if let Some(f) = facet {
            parameters.insert("facet".to_string(), Value::String(f.to_string()));
        }
        Event {
            id: Some(EventId("e1".to_string())),
            task: Some(Task {
                name: "Comparison".to_string(),
                parameters,
            }),
            reason: None,
        }
    }

    #[test]
    fn facet_parameter_becomes_a_token() {
        let messages = ComparisonResource.parse_task(&comparison_event(Some("topic")));
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].main_fact().argument.as_deref(),
            Some("[Comparison:Task:Facet:topic]")
        );
    }

    #[test]
    fn missing_facet_becomes_the_unknown_token() {
        let messages = ComparisonResource.parse_task(&comparison_event(None));
        assert_eq!(
            messages[0].main_fact().argument.as_deref(),
            Some("[Comparison:Task:Unknown]")
        );
    }

    #[test]
    fn rules_cover_every_template_language() {
        let rules = ComparisonResource.slot_rules();
        for lang in ["en", "fi", "de", "fr"] {
            assert_eq!(rules.iter().filter(|r| r.language == lang).count(), 2);
        }
    }
}
