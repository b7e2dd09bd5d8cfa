/// Entity reference resolution — full name on first mention, a
/// pronominal form afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::warn;

use crate::core::language::{GrammaticalCase, LanguageData};

// [Entity:<case>:<id>:<display name>]
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[Entity:([a-z]+):([A-Za-z0-9_-]+):([^\]]+)\]").unwrap());

/// Tracks which entities the current document has already introduced.
/// Scoped to one pipeline run; later fragments never affect earlier
/// text (single forward pass).
pub struct EntityNameResolver<'a> {
    data: &'a LanguageData,
    seen: FxHashSet<String>,
}

impl<'a> EntityNameResolver<'a> {
    pub fn new(data: &'a LanguageData) -> EntityNameResolver<'a> {
        EntityNameResolver {
            data,
            seen: FxHashSet::default(),
        }
    }

    /// Rewrites every entity token in the fragment. First mention of an
    /// id renders the full name (genitive-marked when asked for); later
    /// mentions render the language's pronoun for the requested case.
    /// Languages without a pronoun table keep the full name throughout.
    pub fn resolve(&mut self, language: &str, text: &str) -> String {
        let data = self.data;
        let seen = &mut self.seen;

        ENTITY_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let case = match GrammaticalCase::parse(&caps[1]) {
                    Some(case) => case,
                    None => {
                        warn!(case = &caps[1], "unknown grammatical case in entity token");
                        GrammaticalCase::Subject
                    }
                };
                let id = &caps[2];
                let name = &caps[3];

                let first_mention = seen.insert(id.to_string());
                if first_mention {
                    match case {
                        GrammaticalCase::Genitive => data.genitive_name(language, name),
                        _ => name.to_string(),
                    }
                } else {
                    data.pronoun(language, case)
                        .map(str::to_string)
                        .unwrap_or_else(|| name.to_string())
                }
            })
            .into_owned()
    }
}
