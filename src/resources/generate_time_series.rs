use crate::core::slots::SlotRuleSpec;
use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: The number of documents published over time was computed {parameters} .
fi: Aineiston ajallinen jakauma laskettiin {parameters} .
de: Die zeitliche Verteilung der Dokumente wurde {parameters} berechnet.
fr: La distribution temporelle des documents a été calculée {parameters}.
| name = GenerateTimeSeries
";

const SLOT_RULES: &[SlotRuleSpec] = &[
    SlotRuleSpec {
        language: "en",
        pattern: r"\[TimeSeries:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "split by the facet '{}'",
    },
    SlotRuleSpec {
        language: "en",
        pattern: r"\[TimeSeries:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[TimeSeries:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "'{}' arvojen mukaan jaoteltuna",
    },
    SlotRuleSpec {
        language: "fi",
        pattern: r"\[TimeSeries:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "de",
        pattern: r"\[TimeSeries:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "aufgeschlüsselt nach der Facette '{}'",
    },
    SlotRuleSpec {
        language: "de",
        pattern: r"\[TimeSeries:Task:Unknown\]",
        groups: &[],
        output: "",
    },
    SlotRuleSpec {
        language: "fr",
        pattern: r"\[TimeSeries:Task:Facet:([^\]]+)\]",
        groups: &[0],
        output: "ventilée par la facette «{}»",
    },
    SlotRuleSpec {
        language: "fr",
        pattern: r"\[TimeSeries:Task:Unknown\]",
        groups: &[],
        output: "",
    },
];

pub struct GenerateTimeSeriesResource;

impl Resource for GenerateTimeSeriesResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }

    fn slot_rules(&self) -> Vec<SlotRuleSpec> {
        SLOT_RULES.to_vec()
    }
}

impl TaskResource for GenerateTimeSeriesResource {
    fn task_name(&self) -> &'static str {
        "GenerateTimeSeries"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "GenerateTimeSeries" {
            return Vec::new();
        }

        let params = match task.parameter("facet") {
            Some(facet) => format!("[TimeSeries:Task:Facet:{}]", facet),
            None => "[TimeSeries:Task:Unknown]".to_string(),
        };

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "GenerateTimeSeries",
            Some(params),
            event.source_id(),
        ))]
    }
}
