use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{ReasonResource, Resource};

const TEMPLATE: &str = "
en: This action was taken because the original collection was relatively small, limiting the available analyses that could provide meaningful results.
fi: Tämä tehtiin koska alkuperäinen kokoelma oli suhteellisen pieni, mikä rajoittaa käytettävissä olevia analyysityökaluja.
| name = small_collection
";

pub struct SmallCollectionResource;

impl Resource for SmallCollectionResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl ReasonResource for SmallCollectionResource {
    fn reason_name(&self) -> &'static str {
        "small_collection"
    }

    fn parse_reason(&self, event: &Event) -> Vec<Message> {
        let Some(reason) = &event.reason else {
            return Vec::new();
        };
        if reason.name != "small_collection" {
            return Vec::new();
        }

        vec![Message::new(Fact::new(
            FactCategory::Reason,
            "small_collection",
            None,
            event.source_id(),
        ))]
    }
}
