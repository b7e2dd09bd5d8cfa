use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: [Entity:genitive:collection:the document collection] most common word pairs were counted.
fi: [Entity:genitive:collection:dokumenttikokoelma] yleisimmät sanaparit laskettiin.
| name = ExtractBigrams
";

pub struct ExtractBigramsResource;

impl Resource for ExtractBigramsResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl TaskResource for ExtractBigramsResource {
    fn task_name(&self) -> &'static str {
        "ExtractBigrams"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "ExtractBigrams" {
            return Vec::new();
        }

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "ExtractBigrams",
            None,
            event.source_id(),
        ))]
    }
}
