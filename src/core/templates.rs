/// Template bank — parsing, loading, and lookup of language-specific
/// sentence patterns.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::schema::fact::FactCategory;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error on line {line}: {detail}")]
    Parse { line: usize, detail: String },
    #[error("pattern error in '{name}': {detail}")]
    Pattern { name: String, detail: String },
}

/// A segment of a parsed template pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Named slot: `{parameters}`, filled from the fact during selection.
    Slot(String),
}

/// A language-specific sentence pattern bound to a fact category and name.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub language: String,
    pub category: FactCategory,
    pub name: String,
    pub segments: Vec<PatternSegment>,
}

impl Template {
    /// Parse a pattern string into segments.
    ///
    /// Syntax:
    /// - `{slot_name}` → `Slot`
    /// - `{{` / `}}` → literal braces
    /// - everything else → `Literal`
    ///
    /// Bracketed placeholder tokens (`[Category:Name:...]`) are plain
    /// literal text at this level; later pipeline stages consume them.
    pub fn parse(
        language: &str,
        category: FactCategory,
        name: &str,
        pattern: &str,
    ) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let len = chars.len();
        let mut i = 0;

        let err = |detail: &str| TemplateError::Pattern {
            name: name.to_string(),
            detail: detail.to_string(),
        };

        while i < len {
            if chars[i] == '{' {
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(PatternSegment::Literal(literal_buf.clone()));
                    literal_buf.clear();
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(err("nested braces are not allowed"));
                    }
                    end += 1;
                }
                if end == len {
                    return Err(err("unclosed brace"));
                }

                let content: String = chars[start..end].iter().collect();
                if content.is_empty() {
                    return Err(err("empty slot"));
                }
                segments.push(PatternSegment::Slot(content));
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(err("unmatched closing brace"));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(PatternSegment::Literal(literal_buf));
        }

        Ok(Template {
            language: language.to_string(),
            category,
            name: name.to_string(),
            segments,
        })
    }
}

static META_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*name\s*=\s*([A-Za-z0-9_]+)\s*$").unwrap());

/// All loaded templates, keyed by language code. Populated once at
/// engine build and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct TemplateBank {
    templates: FxHashMap<String, Vec<Template>>,
}

impl TemplateBank {
    pub fn add(&mut self, template: Template) {
        self.templates
            .entry(template.language.clone())
            .or_default()
            .push(template);
    }

    /// Parse a resource's multilingual template text into the bank.
    ///
    /// Format: one or more blocks of `<lang>: <pattern>` lines terminated
    /// by a `| name = <TemplateName>` metadata trailer. Repeated language
    /// lines inside a block are variant patterns for the same name.
    pub fn extend_from_text(
        &mut self,
        category: FactCategory,
        text: &str,
    ) -> Result<(), TemplateError> {
        let mut block: Vec<(usize, String, String)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(meta) = line.strip_prefix('|') {
                let caps = META_RE.captures(meta).ok_or_else(|| TemplateError::Parse {
                    line: lineno,
                    detail: format!("malformed metadata trailer '{}'", line),
                })?;
                let name = caps[1].to_string();
                if block.is_empty() {
                    return Err(TemplateError::Parse {
                        line: lineno,
                        detail: "metadata trailer without preceding patterns".to_string(),
                    });
                }
                for (pattern_line, language, pattern) in block.drain(..) {
                    let template = Template::parse(&language, category, &name, &pattern)
                        .map_err(|e| TemplateError::Parse {
                            line: pattern_line,
                            detail: e.to_string(),
                        })?;
                    self.add(template);
                }
                continue;
            }

            match line.split_once(':') {
                Some((lang, pattern)) => {
                    let lang = lang.trim();
                    if lang.is_empty()
                        || lang.len() > 8
                        || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(TemplateError::Parse {
                            line: lineno,
                            detail: format!("'{}' is not a language code", lang),
                        });
                    }
                    block.push((lineno, lang.to_string(), pattern.trim().to_string()));
                }
                None => {
                    return Err(TemplateError::Parse {
                        line: lineno,
                        detail: format!("expected '<lang>: <pattern>', got '{}'", line),
                    });
                }
            }
        }

        if let Some((lineno, _, _)) = block.first() {
            return Err(TemplateError::Parse {
                line: *lineno,
                detail: "pattern block is missing its '| name = ...' trailer".to_string(),
            });
        }

        Ok(())
    }

    /// Every template whose `(language, category, name)` matches, in
    /// load order. More than one match means variant patterns.
    pub fn matching(&self, language: &str, category: FactCategory, name: &str) -> Vec<&Template> {
        self.templates
            .get(language)
            .map(|ts| {
                ts.iter()
                    .filter(|t| t.category == category && t.name == name)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.templates.contains_key(language)
    }

    /// The language catalog: exactly the set of codes a bank was loaded
    /// for, sorted for stable output.
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.templates.keys().cloned().collect();
        langs.sort();
        langs
    }

    pub fn len(&self) -> usize {
        self.templates.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = "
en: Two corpora were compared {parameters} .
fi: Kahta kokoelmaa verrattiin {parameters} .
| name = Comparison

en: A summary was generated.
en: An automatic summary was produced.
| name = Summarization
";

    #[test]
    fn parse_literal_only() {
        let t = Template::parse("en", FactCategory::Task, "X", "Hello, world.").unwrap();
        assert_eq!(
            t.segments,
            vec![PatternSegment::Literal("Hello, world.".to_string())]
        );
    }

    #[test]
    fn parse_slot() {
        let t = Template::parse(
            "en",
            FactCategory::Task,
            "Comparison",
            "Two corpora were compared {parameters} .",
        )
        .unwrap();
        assert_eq!(t.segments.len(), 3);
        assert_eq!(
            t.segments[1],
            PatternSegment::Slot("parameters".to_string())
        );
    }

    #[test]
    fn parse_escaped_braces() {
        let t = Template::parse("en", FactCategory::Task, "X", "Use {{braces}} here.").unwrap();
        assert_eq!(
            t.segments,
            vec![PatternSegment::Literal("Use {braces} here.".to_string())]
        );
    }

    #[test]
    fn parse_bracket_tokens_stay_literal() {
        let t = Template::parse(
            "en",
            FactCategory::Task,
            "X",
            "[Entity:genitive:collection:the collection] words were counted.",
        )
        .unwrap();
        assert_eq!(t.segments.len(), 1);
        assert!(matches!(&t.segments[0], PatternSegment::Literal(s) if s.starts_with("[Entity:")));
    }

    #[test]
    fn parse_empty_slot_error() {
        assert!(Template::parse("en", FactCategory::Task, "X", "Bad {} here").is_err());
    }

    #[test]
    fn parse_unclosed_brace_error() {
        assert!(Template::parse("en", FactCategory::Task, "X", "Bad {unclosed").is_err());
    }

    #[test]
    fn parse_nested_braces_error() {
        assert!(Template::parse("en", FactCategory::Task, "X", "Bad {a{b}} here").is_err());
    }

    #[test]
    fn parse_unmatched_close_error() {
        assert!(Template::parse("en", FactCategory::Task, "X", "Bad } here").is_err());
    }

    #[test]
    fn bank_loads_blocks_and_variants() {
        let mut bank = TemplateBank::default();
        bank.extend_from_text(FactCategory::Task, BANK).unwrap();

        assert!(bank.has_language("en"));
        assert!(bank.has_language("fi"));
        assert_eq!(bank.languages(), vec!["en".to_string(), "fi".to_string()]);

        let comparison = bank.matching("en", FactCategory::Task, "Comparison");
        assert_eq!(comparison.len(), 1);

        let variants = bank.matching("en", FactCategory::Task, "Summarization");
        assert_eq!(variants.len(), 2);
    }

    #[test]
    fn bank_lookup_respects_category() {
        let mut bank = TemplateBank::default();
        bank.extend_from_text(FactCategory::Reason, "en: Because.\n| name = X")
            .unwrap();
        assert!(bank.matching("en", FactCategory::Task, "X").is_empty());
        assert_eq!(bank.matching("en", FactCategory::Reason, "X").len(), 1);
    }

    #[test]
    fn trailer_without_patterns_is_an_error() {
        let mut bank = TemplateBank::default();
        let err = bank
            .extend_from_text(FactCategory::Task, "| name = Orphan")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Parse { line: 1, .. }));
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let mut bank = TemplateBank::default();
        let err = bank
            .extend_from_text(FactCategory::Task, "en: A sentence.")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Parse { .. }));
    }

    #[test]
    fn malformed_trailer_is_an_error() {
        let mut bank = TemplateBank::default();
        let err = bank
            .extend_from_text(FactCategory::Task, "en: A sentence.\n| label = X")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Parse { line: 2, .. }));
    }

    #[test]
    fn line_without_language_prefix_is_an_error() {
        let mut bank = TemplateBank::default();
        let err = bank
            .extend_from_text(FactCategory::Task, "just some text\n| name = X")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Parse { line: 1, .. }));
    }

    #[test]
    fn pattern_may_contain_colons() {
        let mut bank = TemplateBank::default();
        bank.extend_from_text(
            FactCategory::Task,
            "en: Words of [Entity:genitive:c:the collection] were counted.\n| name = ExtractWords",
        )
        .unwrap();
        let ts = bank.matching("en", FactCategory::Task, "ExtractWords");
        assert_eq!(ts.len(), 1);
    }
}
