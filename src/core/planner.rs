/// Document planning — deciding what is worth reporting, and in what
/// order.

use thiserror::Error;
use tracing::debug;

use crate::schema::fact::FactCategory;
use crate::schema::message::{DocumentPlan, Message, PlanNode};

/// Terminal conditions of planning. Both are recoverable: the caller
/// renders localized boilerplate instead of a report body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The input produced nothing to parse.
    #[error("no messages could be generated for the selection")]
    NoMessagesForSelection,
    /// Messages existed but none survived interest filtering.
    #[error("no messages were interesting enough to report")]
    NoInterestingMessages,
}

/// Filters, orders, and nests the message collection into a document
/// plan.
pub struct DocumentPlanner {
    min_importance: f64,
}

impl Default for DocumentPlanner {
    fn default() -> Self {
        DocumentPlanner {
            min_importance: 0.0,
        }
    }
}

impl DocumentPlanner {
    pub fn new() -> DocumentPlanner {
        DocumentPlanner::default()
    }

    /// A planner that keeps only messages above the given salience.
    pub fn with_min_importance(min_importance: f64) -> DocumentPlanner {
        DocumentPlanner { min_importance }
    }

    /// Policy: drop messages at or below the importance floor, order the
    /// survivors by importance descending (stable, so generator order
    /// breaks ties), and attach each reason message as a child of the
    /// first task node sharing a source event. Reasons with no such task
    /// stay top-level.
    pub fn plan(&self, messages: Vec<Message>) -> Result<DocumentPlan, PlanError> {
        if messages.is_empty() {
            return Err(PlanError::NoMessagesForSelection);
        }

        let total = messages.len();
        let mut kept: Vec<Message> = messages
            .into_iter()
            .filter(|m| m.importance > self.min_importance)
            .collect();
        if kept.is_empty() {
            return Err(PlanError::NoInterestingMessages);
        }
        if kept.len() < total {
            debug!(
                dropped = total - kept.len(),
                "filtered out low-interest messages"
            );
        }

        kept.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut nodes: Vec<PlanNode> = Vec::new();
        for message in kept {
            let parent = if message.main_fact().category == FactCategory::Reason {
                nodes.iter().position(|node| {
                    node.message.main_fact().category == FactCategory::Task
                        && message
                            .facts()
                            .iter()
                            .any(|f| node.message.mentions_event(&f.source))
                })
            } else {
                None
            };

            match parent {
                Some(idx) => nodes[idx].children.push(PlanNode::leaf(message)),
                None => nodes.push(PlanNode::leaf(message)),
            }
        }

        Ok(DocumentPlan { nodes })
    }
}
