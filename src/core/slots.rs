/// Slot realization — ordered regex rewrite rules over the bracketed
/// placeholder tokens embedded in realized text.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("invalid slot pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Declarative form of one rewrite rule, contributed by a resource for
/// its own placeholder vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct SlotRuleSpec {
    /// Language this rule fires for; rules never cross languages.
    pub language: &'static str,
    /// Regex matched against the realized text.
    pub pattern: &'static str,
    /// 0-based indices of the capture groups substituted into `output`.
    pub groups: &'static [usize],
    /// Output phrase with one `{}` per selected group. May be empty, to
    /// realize an unknown value as silence.
    pub output: &'static str,
}

#[derive(Debug)]
struct SlotRule {
    regex: Regex,
    groups: Vec<usize>,
    output: String,
}

/// Applies every registered rule for one language, in registration
/// order. Order is a contract: when rules could overlap, the earlier
/// registration wins the text it consumes.
#[derive(Debug, Default)]
pub struct SlotRealizer {
    rules: FxHashMap<String, Vec<SlotRule>>,
}

impl SlotRealizer {
    /// Compile rule specs at engine build, so a malformed pattern is a
    /// startup error rather than a per-request one.
    pub fn compile(specs: &[SlotRuleSpec]) -> Result<SlotRealizer, SlotError> {
        let mut rules: FxHashMap<String, Vec<SlotRule>> = FxHashMap::default();
        for spec in specs {
            let regex = Regex::new(spec.pattern).map_err(|source| SlotError::Pattern {
                pattern: spec.pattern.to_string(),
                source,
            })?;
            rules.entry(spec.language.to_string()).or_default().push(SlotRule {
                regex,
                groups: spec.groups.to_vec(),
                output: spec.output.to_string(),
            });
        }
        Ok(SlotRealizer { rules })
    }

    /// Rewrites every token a rule of this language matches. Tokens no
    /// rule matches are left in place, visibly.
    pub fn realize(&self, language: &str, text: &str) -> String {
        let Some(rules) = self.rules.get(language) else {
            return text.to_string();
        };
        let mut out = text.to_string();
        for rule in rules {
            let next = rule
                .regex
                .replace_all(&out, |caps: &regex::Captures<'_>| {
                    let mut phrase = rule.output.clone();
                    for group in &rule.groups {
                        let value = caps
                            .get(group + 1)
                            .map(|m| m.as_str())
                            .unwrap_or_default();
                        phrase = phrase.replacen("{}", value, 1);
                    }
                    phrase
                })
                .into_owned();
            out = next;
        }
        out
    }

    pub fn rule_count(&self, language: &str) -> usize {
        self.rules.get(language).map(Vec::len).unwrap_or(0)
    }
}

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[A-Za-z][A-Za-z0-9_]*:[^\]]*\]").unwrap());

/// Bracketed placeholder tokens still present in a final text. Any
/// leftover is a defect to surface, not to hide.
pub fn leftover_tokens(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}
