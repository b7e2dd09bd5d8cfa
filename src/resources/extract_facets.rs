use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{Resource, TaskResource};

const TEMPLATE: &str = "
en: The publication years, newspapers names and languages of the documents were extracted.
fi: Aineistosta etsittiin siinä esiintyvät julkaisuvuodet, sanomalehtien nimet ja kielet.
de: Die Erscheinungsjahre, Zeitungsnamen und Sprachen der Dokumente wurden extrahiert.
fr: Les années de publication, les titres des journaux et les langues des documents ont été extraits.
| name = ExtractFacets
";

pub struct ExtractFacetsResource;

impl Resource for ExtractFacetsResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl TaskResource for ExtractFacetsResource {
    fn task_name(&self) -> &'static str {
        "ExtractFacets"
    }

    fn parse_task(&self, event: &Event) -> Vec<Message> {
        let Some(task) = &event.task else {
            return Vec::new();
        };
        if task.name != "ExtractFacets" {
            return Vec::new();
        }

        vec![Message::new(Fact::new(
            FactCategory::Task,
            "ExtractFacets",
            None,
            event.source_id(),
        ))]
    }
}
