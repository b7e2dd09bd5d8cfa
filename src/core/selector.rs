/// Template selection — mapping each planned fact to a concrete
/// language-specific template and filling its slots.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::warn;

use crate::core::language::{LanguageData, NO_TEMPLATE};
use crate::core::templates::{PatternSegment, Template, TemplateBank};
use crate::schema::fact::Fact;
use crate::schema::message::{DocumentPlan, Message, PlanNode};

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no template for language '{language}' matching {category}/{name}")]
    TemplateNotFound {
        language: String,
        category: &'static str,
        name: String,
    },
}

/// One realized node: the message's text fragment plus its subordinate
/// fragments, mirroring the document plan's shape.
#[derive(Debug, Clone)]
pub struct RealizedNode {
    pub text: String,
    pub children: Vec<RealizedNode>,
}

/// The document plan after template selection: text fragments in
/// document order, still possibly carrying placeholder tokens.
#[derive(Debug, Clone, Default)]
pub struct RealizedPlan {
    pub nodes: Vec<RealizedNode>,
}

impl RealizedPlan {
    /// Rewrites every fragment in document order.
    pub fn map_texts(&mut self, f: &mut impl FnMut(&str) -> String) {
        fn walk(nodes: &mut [RealizedNode], f: &mut impl FnMut(&str) -> String) {
            for node in nodes {
                node.text = f(&node.text);
                walk(&mut node.children, f);
            }
        }
        walk(&mut self.nodes, f);
    }

    /// Rewrites every fragment, stopping at the first failure.
    pub fn try_map_texts<E>(
        &mut self,
        f: &mut impl FnMut(&str) -> Result<String, E>,
    ) -> Result<(), E> {
        fn walk<E>(
            nodes: &mut [RealizedNode],
            f: &mut impl FnMut(&str) -> Result<String, E>,
        ) -> Result<(), E> {
            for node in nodes {
                node.text = f(&node.text)?;
                walk(&mut node.children, f)?;
            }
            Ok(())
        }
        walk(&mut self.nodes, f)
    }

    /// Every fragment in document order.
    pub fn texts(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [RealizedNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                out.push(node.text.as_str());
                walk(&node.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }
}

/// Constructed fresh per run; borrows the read-only bank and language
/// constants.
pub struct TemplateSelector<'a> {
    bank: &'a TemplateBank,
    data: &'a LanguageData,
}

impl<'a> TemplateSelector<'a> {
    pub fn new(bank: &'a TemplateBank, data: &'a LanguageData) -> TemplateSelector<'a> {
        TemplateSelector { bank, data }
    }

    /// Realizes the whole plan. A fact with no registered template is
    /// replaced by the language's no-template boilerplate — the failure
    /// stays local to that message and never aborts the document.
    pub fn select(
        &self,
        plan: &DocumentPlan,
        language: &str,
        rng: &mut StdRng,
    ) -> RealizedPlan {
        RealizedPlan {
            nodes: plan
                .nodes
                .iter()
                .map(|node| self.select_node(node, language, rng))
                .collect(),
        }
    }

    fn select_node(&self, node: &PlanNode, language: &str, rng: &mut StdRng) -> RealizedNode {
        RealizedNode {
            text: self.realize_message(&node.message, language, rng),
            children: node
                .children
                .iter()
                .map(|child| self.select_node(child, language, rng))
                .collect(),
        }
    }

    fn realize_message(&self, message: &Message, language: &str, rng: &mut StdRng) -> String {
        let fragments: Vec<String> = message
            .facts()
            .iter()
            .map(|fact| match self.realize_fact(fact, language, rng) {
                Ok(text) => text,
                Err(err) => {
                    warn!(%err, "falling back to no-template boilerplate");
                    self.data.error_message(language, NO_TEMPLATE)
                }
            })
            .collect();

        match fragments.len() {
            1 => fragments.into_iter().next().unwrap_or_default(),
            _ => {
                let combiner = self.data.default_combiner(language).unwrap_or("and");
                join_with_combiner(&fragments, combiner)
            }
        }
    }

    /// Selection is a pure function of `(language, category, name)` and
    /// the fact's argument, given a fixed RNG state: variant templates
    /// are drawn with the run's seeded generator.
    fn realize_fact(
        &self,
        fact: &Fact,
        language: &str,
        rng: &mut StdRng,
    ) -> Result<String, SelectError> {
        let candidates = self.bank.matching(language, fact.category, &fact.name);
        let template = candidates
            .choose(rng)
            .ok_or_else(|| SelectError::TemplateNotFound {
                language: language.to_string(),
                category: fact.category.as_str(),
                name: fact.name.clone(),
            })?;
        Ok(self.fill(template, fact))
    }

    fn fill(&self, template: &Template, fact: &Fact) -> String {
        let mut out = String::new();
        for segment in &template.segments {
            match segment {
                PatternSegment::Literal(text) => out.push_str(text),
                PatternSegment::Slot(slot) => match slot.as_str() {
                    "parameters" => {
                        out.push_str(fact.argument.as_deref().unwrap_or_default())
                    }
                    "name" => out.push_str(&fact.name),
                    other => {
                        // An unfillable slot stays visible in the output.
                        warn!(slot = other, template = %template.name, "unknown template slot");
                        out.push('{');
                        out.push_str(other);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

fn join_with_combiner(fragments: &[String], combiner: &str) -> String {
    match fragments.len() {
        0 => String::new(),
        1 => fragments[0].clone(),
        _ => {
            let head = &fragments[..fragments.len() - 1];
            let last = &fragments[fragments.len() - 1];
            format!("{} {} {}", head.join(", "), combiner, last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::event::EventId;
    use crate::schema::fact::FactCategory;
    use rand::SeedableRng;

    fn bank() -> TemplateBank {
        let mut bank = TemplateBank::default();
        bank.extend_from_text(
            FactCategory::Task,
            "en: Two corpora were compared {parameters} .\n| name = Comparison\n\
             en: The facets were extracted.\n| name = ExtractFacets",
        )
        .unwrap();
        bank
    }

    fn data() -> LanguageData {
        LanguageData::embedded().unwrap()
    }

    fn plan_of(facts: Vec<Fact>) -> DocumentPlan {
        DocumentPlan {
            nodes: facts
                .into_iter()
                .map(|f| crate::schema::message::PlanNode::leaf(Message::new(f)))
                .collect(),
        }
    }

    #[test]
    fn fills_the_parameters_slot_from_the_argument() {
        let bank = bank();
        let data = data();
        let selector = TemplateSelector::new(&bank, &data);
        let plan = plan_of(vec![Fact::new(
            FactCategory::Task,
            "Comparison",
            Some("[Comparison:Task:Facet:topic]".to_string()),
            EventId("e1".to_string()),
        )]);
        let mut rng = StdRng::seed_from_u64(1);
        let realized = selector.select(&plan, "en", &mut rng);
        assert_eq!(
            realized.nodes[0].text,
            "Two corpora were compared [Comparison:Task:Facet:topic] ."
        );
    }

    #[test]
    fn missing_template_falls_back_without_aborting() {
        let bank = bank();
        let data = data();
        let selector = TemplateSelector::new(&bank, &data);
        let plan = plan_of(vec![
            Fact::new(
                FactCategory::Task,
                "NoSuchTemplate",
                None,
                EventId("e1".to_string()),
            ),
            Fact::new(FactCategory::Task, "ExtractFacets", None, EventId("e2".to_string())),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let realized = selector.select(&plan, "en", &mut rng);
        assert_eq!(realized.nodes.len(), 2);
        assert!(realized.nodes[0].text.contains("I don't know how to express"));
        assert_eq!(realized.nodes[1].text, "The facets were extracted.");
    }

    #[test]
    fn identical_facts_realize_identically_for_a_fixed_seed() {
        let bank = bank();
        let data = data();
        let selector = TemplateSelector::new(&bank, &data);
        let plan = plan_of(vec![Fact::new(
            FactCategory::Task,
            "ExtractFacets",
            None,
            EventId("e1".to_string()),
        )]);
        let a = selector.select(&plan, "en", &mut StdRng::seed_from_u64(7));
        let b = selector.select(&plan, "en", &mut StdRng::seed_from_u64(7));
        assert_eq!(a.nodes[0].text, b.nodes[0].text);
    }

    #[test]
    fn variant_choice_is_seed_deterministic() {
        let mut bank = TemplateBank::default();
        bank.extend_from_text(
            FactCategory::Task,
            "en: Variant one.\nen: Variant two.\nen: Variant three.\n| name = X",
        )
        .unwrap();
        let data = data();
        let selector = TemplateSelector::new(&bank, &data);
        let plan = plan_of(vec![Fact::new(
            FactCategory::Task,
            "X",
            None,
            EventId("e1".to_string()),
        )]);
        let a = selector.select(&plan, "en", &mut StdRng::seed_from_u64(3));
        let b = selector.select(&plan, "en", &mut StdRng::seed_from_u64(3));
        assert_eq!(a.nodes[0].text, b.nodes[0].text);
        assert!(a.nodes[0].text.starts_with("Variant"));
    }

    #[test]
    fn multi_fact_messages_join_with_the_default_combiner() {
        let bank = bank();
        let data = data();
        let selector = TemplateSelector::new(&bank, &data);
        let mut message = Message::new(Fact::new(
            FactCategory::Task,
            "ExtractFacets",
            None,
            EventId("e1".to_string()),
        ));
        message.push_fact(Fact::new(
            FactCategory::Task,
            "ExtractFacets",
            None,
            EventId("e1".to_string()),
        ));
        let plan = DocumentPlan {
            nodes: vec![crate::schema::message::PlanNode::leaf(message)],
        };
        let mut rng = StdRng::seed_from_u64(1);
        let realized = selector.select(&plan, "en", &mut rng);
        assert_eq!(
            realized.nodes[0].text,
            "The facets were extracted. and The facets were extracted."
        );
    }

    #[test]
    fn map_texts_visits_children() {
        let mut plan = RealizedPlan {
            nodes: vec![RealizedNode {
                text: "a".to_string(),
                children: vec![RealizedNode {
                    text: "b".to_string(),
                    children: Vec::new(),
                }],
            }],
        };
        plan.map_texts(&mut |t| t.to_uppercase());
        assert_eq!(plan.texts(), vec!["A", "B"]);
    }
}
