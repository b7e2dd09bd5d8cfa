use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

// The entity token makes repeated mentions of the collection across one
// report collapse into a pronoun.
const TEMPLATE: &str = "
en: [Entity:genitive:collection:the document collection] most common words were counted.
fi: [Entity:genitive:collection:dokumenttikokoelma] yleisimmät sanat laskettiin.
| name = ExtractWords
";

pub struct ExtractWordsResource;

impl Resource for ExtractWordsResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl TaskResource for ExtractWordsResource {
    fn task_name(&self) -> &'static str {
        "ExtractWords"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "ExtractWords" {
            return Vec::new();
        }

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "ExtractWords",
            None,
            event.source_id(),
        ))]
    }
}
