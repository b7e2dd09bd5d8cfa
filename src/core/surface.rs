/// Surface realization — serializing the realized plan into output
/// markup. Pure formatting; no linguistic decisions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::selector::{RealizedNode, RealizedPlan};

/// The markup shapes a run can produce. Headline is the reduced form
/// used by the second pipeline of each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStyle {
    UnorderedList,
    OrderedList,
    Headline,
}

static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,;:!?])").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

pub struct SurfaceRealizer {
    style: SurfaceStyle,
}

impl SurfaceRealizer {
    pub fn new(style: SurfaceStyle) -> SurfaceRealizer {
        SurfaceRealizer { style }
    }

    pub fn realize(&self, plan: &RealizedPlan) -> String {
        match self.style {
            SurfaceStyle::UnorderedList => self.list(plan, "ul"),
            SurfaceStyle::OrderedList => self.list(plan, "ol"),
            SurfaceStyle::Headline => self.headline(plan),
        }
    }

    /// One list item per top-level node; subordinate fragments are
    /// appended inside the same item, after the text they explain.
    fn list(&self, plan: &RealizedPlan, tag: &str) -> String {
        let mut out = format!("<{}>", tag);
        for node in &plan.nodes {
            out.push_str("<li>");
            out.push_str(&item_text(node));
            out.push_str("</li>");
        }
        out.push_str(&format!("</{}>", tag));
        out
    }

    /// The most salient top-level fragment, unwrapped and without a
    /// closing period.
    fn headline(&self, plan: &RealizedPlan) -> String {
        let Some(first) = plan.nodes.first() else {
            return String::new();
        };
        let text = tidy(&first.text);
        text.trim_end_matches('.').trim_end().to_string()
    }
}

fn item_text(node: &RealizedNode) -> String {
    let mut parts = vec![node.text.clone()];
    collect_children(&node.children, &mut parts);
    tidy(&parts.join(" "))
}

fn collect_children(children: &[RealizedNode], out: &mut Vec<String>) {
    for child in children {
        out.push(child.text.clone());
        collect_children(&child.children, out);
    }
}

/// Collapses whitespace runs and strips the space a silent slot leaves
/// before punctuation.
fn tidy(text: &str) -> String {
    let collapsed = MULTI_SPACE.replace_all(text.trim(), " ");
    SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(text: &str) -> RealizedNode {
        RealizedNode {
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    #[test]
    fn unordered_list_wraps_each_node() {
        let plan = RealizedPlan {
            nodes: vec![node("First sentence."), node("Second sentence.")],
        };
        let out = SurfaceRealizer::new(SurfaceStyle::UnorderedList).realize(&plan);
        assert_eq!(
            out,
            "<ul><li>First sentence.</li><li>Second sentence.</li></ul>"
        );
    }

    #[test]
    fn ordered_list_uses_ol() {
        let plan = RealizedPlan {
            nodes: vec![node("Only sentence.")],
        };
        let out = SurfaceRealizer::new(SurfaceStyle::OrderedList).realize(&plan);
        assert_eq!(out, "<ol><li>Only sentence.</li></ol>");
    }

    #[test]
    fn children_share_their_parent_item() {
        let plan = RealizedPlan {
            nodes: vec![RealizedNode {
                text: "The task ran.".to_string(),
                children: vec![node("Because of reasons.")],
            }],
        };
        let out = SurfaceRealizer::new(SurfaceStyle::UnorderedList).realize(&plan);
        assert_eq!(out, "<ul><li>The task ran. Because of reasons.</li></ul>");
    }

    #[test]
    fn tidy_removes_silent_slot_residue() {
        let plan = RealizedPlan {
            nodes: vec![node("Two corpora were compared  .")],
        };
        let out = SurfaceRealizer::new(SurfaceStyle::UnorderedList).realize(&plan);
        assert_eq!(out, "<ul><li>Two corpora were compared.</li></ul>");
    }

    #[test]
    fn headline_is_the_first_fragment_without_markup() {
        let plan = RealizedPlan {
            nodes: vec![node("The facets were extracted."), node("Ignored.")],
        };
        let out = SurfaceRealizer::new(SurfaceStyle::Headline).realize(&plan);
        assert_eq!(out, "The facets were extracted");
    }

    #[test]
    fn headline_of_empty_plan_is_empty() {
        let out = SurfaceRealizer::new(SurfaceStyle::Headline).realize(&RealizedPlan::default());
        assert_eq!(out, "");
    }

    #[test]
    fn empty_plan_renders_an_empty_list() {
        let out =
            SurfaceRealizer::new(SurfaceStyle::UnorderedList).realize(&RealizedPlan::default());
        assert_eq!(out, "<ul></ul>");
    }
}
