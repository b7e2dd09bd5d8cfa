use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: An automatic summary of the documents was generated.
fi: Aineistosta luotiin automaattinen tiivistelmä.
de: Eine automatische Zusammenfassung der Dokumente wurde erstellt.
fr: Un résumé automatique des documents a été généré.
| name = Summarization
";

pub struct SummarizationResource;

impl Resource for SummarizationResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl TaskResource for SummarizationResource {
    fn task_name(&self) -> &'static str {
        "Summarization"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "Summarization" {
            return Vec::new();
        }

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "Summarization",
            None,
            event.source_id(),
        ))]
    }
}
