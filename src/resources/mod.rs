/// Resource protocol — pluggable per-task and per-reason content
/// providers. Each resource bundles a multilingual template bank, a
/// parser from events to messages, and the rewrite rules for its own
/// placeholder vocabulary.

use thiserror::Error;

use crate::core::slots::SlotRuleSpec;
use crate::core::templates::{TemplateBank, TemplateError};
use crate::schema::event::Event;
use crate::schema::fact::FactCategory;
use crate::schema::message::Message;

pub mod comparison;
pub mod crosslingual_comparison;
pub mod extract_bigrams;
pub mod extract_facets;
pub mod extract_words;
pub mod generate_time_series;
pub mod query_topic_model;
pub mod small_collection;
pub mod split_by_facet;
pub mod summarization;
pub mod unknown_reason;
pub mod unknown_task;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("two resources claim the task name '{0}'")]
    DuplicateTask(String),
    #[error("two resources claim the reason name '{0}'")]
    DuplicateReason(String),
}

/// Shared surface of every resource.
pub trait Resource: Send + Sync {
    /// Raw multilingual template text, in `<lang>: <pattern>` blocks
    /// terminated by `| name = <TemplateName>` trailers.
    fn template_text(&self) -> &'static str;

    /// Rewrite rules for the placeholder tokens this resource's parser
    /// or templates emit. Empty for resources without a vocabulary.
    fn slot_rules(&self) -> Vec<SlotRuleSpec> {
        Vec::new()
    }
}

/// A resource responsible for one task kind.
pub trait TaskResource: Resource {
    /// The task name this resource claims, for conflict detection at
    /// registration time.
    fn task_name(&self) -> &'static str;

    /// Returns messages for the event's task, or nothing when the task
    /// is not this resource's kind.
    fn parse_task(&self, event: &Event) -> Vec<Message>;
}

/// A resource responsible for one reason kind.
pub trait ReasonResource: Resource {
    fn reason_name(&self) -> &'static str;
    fn parse_reason(&self, event: &Event) -> Vec<Message>;
}

/// Typed registries for task and reason resources, plus the designated
/// catch-alls for names no resource claims.
pub struct ResourceSet {
    tasks: Vec<Box<dyn TaskResource>>,
    reasons: Vec<Box<dyn ReasonResource>>,
    unknown_task: Box<dyn TaskResource>,
    unknown_reason: Box<dyn ReasonResource>,
}

impl ResourceSet {
    /// An empty set with the given catch-alls.
    pub fn new(
        unknown_task: Box<dyn TaskResource>,
        unknown_reason: Box<dyn ReasonResource>,
    ) -> ResourceSet {
        ResourceSet {
            tasks: Vec::new(),
            reasons: Vec::new(),
            unknown_task,
            unknown_reason,
        }
    }

    /// The full roster of built-in resources.
    pub fn standard() -> Result<ResourceSet, ResourceError> {
        let mut set = ResourceSet::new(
            Box::new(unknown_task::UnknownTaskResource),
            Box::new(unknown_reason::UnknownReasonResource),
        );
        set.register_task(Box::new(extract_facets::ExtractFacetsResource))?;
        set.register_task(Box::new(comparison::ComparisonResource))?;
        set.register_task(Box::new(extract_words::ExtractWordsResource))?;
        set.register_task(Box::new(extract_bigrams::ExtractBigramsResource))?;
        set.register_task(Box::new(generate_time_series::GenerateTimeSeriesResource))?;
        set.register_task(Box::new(split_by_facet::SplitByFacetResource))?;
        set.register_task(Box::new(query_topic_model::QueryTopicModelResource))?;
        set.register_task(Box::new(summarization::SummarizationResource))?;
        set.register_reason(Box::new(small_collection::SmallCollectionResource))?;
        set.register_reason(Box::new(
            crosslingual_comparison::CrosslingualComparisonResource,
        ))?;
        Ok(set)
    }

    /// Registers a task resource. Claiming an already-claimed task name
    /// is rejected outright; there is no silent override.
    pub fn register_task(&mut self, resource: Box<dyn TaskResource>) -> Result<(), ResourceError> {
        let name = resource.task_name();
        if self.tasks.iter().any(|r| r.task_name() == name) {
            return Err(ResourceError::DuplicateTask(name.to_string()));
        }
        self.tasks.push(resource);
        Ok(())
    }

    pub fn register_reason(
        &mut self,
        resource: Box<dyn ReasonResource>,
    ) -> Result<(), ResourceError> {
        let name = resource.reason_name();
        if self.reasons.iter().any(|r| r.reason_name() == name) {
            return Err(ResourceError::DuplicateReason(name.to_string()));
        }
        self.reasons.push(resource);
        Ok(())
    }

    pub fn tasks(&self) -> &[Box<dyn TaskResource>] {
        &self.tasks
    }

    pub fn reasons(&self) -> &[Box<dyn ReasonResource>] {
        &self.reasons
    }

    pub fn unknown_task(&self) -> &dyn TaskResource {
        self.unknown_task.as_ref()
    }

    pub fn unknown_reason(&self) -> &dyn ReasonResource {
        self.unknown_reason.as_ref()
    }

    /// Builds the template bank from every registered resource's text,
    /// catch-alls included.
    pub fn template_bank(&self) -> Result<TemplateBank, TemplateError> {
        let mut bank = TemplateBank::default();
        for resource in &self.tasks {
            bank.extend_from_text(FactCategory::Task, resource.template_text())?;
        }
        bank.extend_from_text(FactCategory::Task, self.unknown_task.template_text())?;
        for resource in &self.reasons {
            bank.extend_from_text(FactCategory::Reason, resource.template_text())?;
        }
        bank.extend_from_text(FactCategory::Reason, self.unknown_reason.template_text())?;
        Ok(bank)
    }

    /// Every resource's rewrite rules, in registration order. The order
    /// is the slot realizer's application order.
    pub fn slot_rule_specs(&self) -> Vec<SlotRuleSpec> {
        let mut specs = Vec::new();
        for resource in &self.tasks {
            specs.extend(resource.slot_rules());
        }
        specs.extend(self.unknown_task.slot_rules());
        for resource in &self.reasons {
            specs.extend(resource.slot_rules());
        }
        specs.extend(self.unknown_reason.slot_rules());
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_builds() {
        let set = ResourceSet::standard().unwrap();
        assert!(set.tasks().len() >= 8);
        assert!(set.reasons().len() >= 2);
    }

    #[test]
    fn standard_bank_covers_four_languages() {
        let set = ResourceSet::standard().unwrap();
        let bank = set.template_bank().unwrap();
        assert_eq!(
            bank.languages(),
            vec![
                "de".to_string(),
                "en".to_string(),
                "fi".to_string(),
                "fr".to_string()
            ]
        );
    }

    #[test]
    fn duplicate_task_claim_is_rejected() {
        let mut set = ResourceSet::new(
            Box::new(unknown_task::UnknownTaskResource),
            Box::new(unknown_reason::UnknownReasonResource),
        );
        set.register_task(Box::new(comparison::ComparisonResource))
            .unwrap();
        let err = set
            .register_task(Box::new(comparison::ComparisonResource))
            .unwrap_err();
        assert!(matches!(err, ResourceError::DuplicateTask(name) if name == "Comparison"));
    }

    #[test]
    fn duplicate_reason_claim_is_rejected() {
        let mut set = ResourceSet::new(
            Box::new(unknown_task::UnknownTaskResource),
            Box::new(unknown_reason::UnknownReasonResource),
        );
        set.register_reason(Box::new(small_collection::SmallCollectionResource))
            .unwrap();
        let err = set
            .register_reason(Box::new(small_collection::SmallCollectionResource))
            .unwrap_err();
        assert!(matches!(err, ResourceError::DuplicateReason(_)));
    }

    #[test]
    fn slot_rules_collected_in_registration_order() {
        let set = ResourceSet::standard().unwrap();
        let specs = set.slot_rule_specs();
        // Comparison's facet rule must precede GenerateTimeSeries' one,
        // because Comparison registers first in the standard roster.
        let comparison_pos = specs
            .iter()
            .position(|s| s.pattern.contains("Comparison"))
            .unwrap();
        let timeseries_pos = specs
            .iter()
            .position(|s| s.pattern.contains("TimeSeries"))
            .unwrap();
        assert!(comparison_pos < timeseries_pos);
    }
}
