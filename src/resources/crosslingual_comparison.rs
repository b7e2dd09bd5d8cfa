use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{ReasonResource, Resource};

const TEMPLATE: &str = "
en: This step was taken to compare datasets that are of different languages, thus limiting the available options.
fi: Tämä tehtiin koska haluttiin verrata kahta eri kielistä aineistoa, mikä rajoittaa käytettävissä olevia analyysityökaluja.
| name = crosslingual_comparison
";

pub struct CrosslingualComparisonResource;

impl Resource for CrosslingualComparisonResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl ReasonResource for CrosslingualComparisonResource {
    // The upstream event name carries a space; the fact name does not.
    fn reason_name(&self) -> &'static str {
        "crosslingual comparison"
    }

    fn parse_reason(&self, event: &Event) -> Vec<Message> {
        let Some(reason) = &event.reason else {
            return Vec::new();
        };
        if reason.name != "crosslingual comparison" {
            return Vec::new();
        }

        vec![Message::new(Fact::new(
            FactCategory::Reason,
            "crosslingual_comparison",
            None,
            event.source_id(),
        ))]
    }
}
