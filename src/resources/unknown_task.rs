use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: An analysis step of a kind unknown to the reporter was performed on the documents.
fi: Aineistolle suoritettiin analyysi, jota raportoija ei tunnista.
de: Ein dem Berichtssystem unbekannter Analyseschritt wurde auf den Dokumenten ausgeführt.
fr: Une étape d'analyse inconnue du système de rapport a été appliquée aux documents.
| name = UnknownTask
";

/// Catch-all for task names no registered resource claims. Unrecognized
/// tasks are reported, just with less to say, so they rank below real
/// content.
pub struct UnknownTaskResource;

impl Resource for UnknownTaskResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl TaskResource for UnknownTaskResource {
    fn task_name(&self) -> &'static str {
        "UnknownTask"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        if event.task.is_none() {
            return Vec::new();
        }
        vec![Message::with_importance(
            Fact::new(FactCategory::Task, "UnknownTask", None, event.source_id()),
            2.0,
        )]
    }
}
