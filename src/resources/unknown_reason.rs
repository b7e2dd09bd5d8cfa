use crate::schema::event::Event;
use crate::schema::fact::{Fact, FactCategory};
use crate::schema::message::Message;

use super::{ReasonResource, Resource};

const TEMPLATE: &str = "
en: This step was taken for a reason the reporter does not recognize.
fi: Tämän vaiheen syytä ei tunnistettu.
| name = UnknownReason
";

/// Catch-all for reason names no registered resource claims. An
/// unrecognized reason alone is nothing worth reporting, so the message
/// carries zero importance and the planner filters it out.
pub struct UnknownReasonResource;

impl Resource for UnknownReasonResource {
    fn template_text(&self) -> &'static str {
        TEMPLATE
    }
}

impl ReasonResource for UnknownReasonResource {
    fn reason_name(&self) -> &'static str {
        "UnknownReason"
    }

    fn parse_reason(&self, event: &Event) -> Vec<Message> {
        if event.reason.is_none() {
            return Vec::new();
        }
        vec![Message::with_importance(
            Fact::new(
                FactCategory::Reason,
                "UnknownReason",
                None,
                event.source_id(),
            ),
            0.0,
        )]
    }
}
