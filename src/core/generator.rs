/// Message generation — runs every registered resource parser over the
/// incoming events and collects the produced messages.

use tracing::debug;

use crate::resources::ResourceSet;
use crate::schema::event::Event;
use crate::schema::message::Message;

/// Constructed fresh for each pipeline run; borrows the shared,
/// read-only resource registries.
pub struct MessageGenerator<'a> {
    resources: &'a ResourceSet,
}

impl<'a> MessageGenerator<'a> {
    pub fn new(resources: &'a ResourceSet) -> MessageGenerator<'a> {
        MessageGenerator { resources }
    }

    /// Collects every message any resource produces for the events.
    ///
    /// An event whose task (or reason) name no resource claims is routed
    /// to the corresponding catch-all, so unmapped input still yields a
    /// message rather than stalling the pipeline.
    pub fn generate(&self, events: &[Event]) -> Vec<Message> {
        let mut messages = Vec::new();

        for event in events {
            if let Some(task) = &event.task {
                let before = messages.len();
                for resource in self.resources.tasks() {
                    messages.extend(resource.parse_task(event));
                }
                if messages.len() == before {
                    debug!(task = %task.name, "no resource claimed task, using catch-all");
                    messages.extend(self.resources.unknown_task().parse_task(event));
                }
            }

            if let Some(reason) = &event.reason {
                let before = messages.len();
                for resource in self.resources.reasons() {
                    messages.extend(resource.parse_reason(event));
                }
                if messages.len() == before {
                    debug!(reason = %reason.name, "no resource claimed reason, using catch-all");
                    messages.extend(self.resources.unknown_reason().parse_reason(event));
                }
            }
        }

        messages
    }
}
