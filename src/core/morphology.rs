/// Morphological realization — language-keyed dispatch to pluggable
/// inflection analyzers.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::language::LanguageData;

#[derive(Debug, Error)]
pub enum MorphError {
    #[error("no morphological analyzer registered for language '{0}'")]
    UnsupportedLanguage(String),
    #[error("analyzer error: {0}")]
    Analyzer(String),
}

/// Language data handed to analyzers at inflection time.
pub struct MorphContext<'a> {
    pub language: &'a str,
    pub data: &'a LanguageData,
}

/// One pluggable analyzer per supported language. Real morphology
/// engines plug in here; the built-in analyzers are rule-based.
pub trait MorphologicalAnalyzer: Send + Sync {
    fn inflect(&self, text: &str, context: &MorphContext<'_>) -> Result<String, MorphError>;
}

static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[ORDINAL:(\d+)\]").unwrap());
static CARDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[CARDINAL:(\d+)\]").unwrap());
static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([Aa]) ([aeiouAEIOU])").unwrap());

/// Replaces numeral tokens, consulting the language's spelling tables
/// first and the given digit-rendering fallbacks otherwise.
fn realize_numerals(
    text: &str,
    context: &MorphContext<'_>,
    ordinal_fallback: fn(&str) -> String,
    cardinal_fallback: fn(&str) -> String,
) -> String {
    let with_ordinals = ORDINAL_RE.replace_all(text, |caps: &regex::Captures<'_>| {
        let digits = &caps[1];
        match context.data.ordinal(context.language, digits) {
            Some(word) => word.to_string(),
            None => ordinal_fallback(digits),
        }
    });
    CARDINAL_RE
        .replace_all(&with_ordinals, |caps: &regex::Captures<'_>| {
            let digits = &caps[1];
            match context.data.cardinal(context.language, digits) {
                Some(word) => word.to_string(),
                None => cardinal_fallback(digits),
            }
        })
        .into_owned()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            first.to_uppercase().collect::<String>() + chars.as_str()
        }
        _ => text.to_string(),
    }
}

fn english_ordinal_suffix(digits: &str) -> String {
    let suffix = if digits.ends_with('1') && !digits.ends_with("11") {
        "st"
    } else if digits.ends_with('2') && !digits.ends_with("12") {
        "nd"
    } else if digits.ends_with('3') && !digits.ends_with("13") {
        "rd"
    } else {
        "th"
    };
    format!("{}{}", digits, suffix)
}

fn plain_digits(digits: &str) -> String {
    digits.to_string()
}

fn dotted_ordinal(digits: &str) -> String {
    format!("{}.", digits)
}

/// Rule-based English inflection: numeral spelling, indefinite-article
/// agreement, sentence-initial capitalization.
pub struct EnglishAnalyzer;

impl MorphologicalAnalyzer for EnglishAnalyzer {
    fn inflect(&self, text: &str, context: &MorphContext<'_>) -> Result<String, MorphError> {
        let text = realize_numerals(text, context, english_ordinal_suffix, plain_digits);
        let text = ARTICLE_RE
            .replace_all(&text, |caps: &regex::Captures<'_>| {
                let article = if &caps[1] == "A" { "An" } else { "an" };
                format!("{} {}", article, &caps[2])
            })
            .into_owned();
        Ok(capitalize_first(&text))
    }
}

/// Rule-based Finnish inflection: numeral fallback and capitalization.
/// Case and agreement beyond this come from an external analyzer.
pub struct FinnishAnalyzer;

impl MorphologicalAnalyzer for FinnishAnalyzer {
    fn inflect(&self, text: &str, context: &MorphContext<'_>) -> Result<String, MorphError> {
        let text = realize_numerals(text, context, dotted_ordinal, plain_digits);
        Ok(capitalize_first(&text))
    }
}

/// Minimal analyzer for bank languages without a dedicated one: numeral
/// tokens still resolve to digits, the rest passes through.
pub struct PassThroughAnalyzer;

impl MorphologicalAnalyzer for PassThroughAnalyzer {
    fn inflect(&self, text: &str, context: &MorphContext<'_>) -> Result<String, MorphError> {
        let text = realize_numerals(text, context, dotted_ordinal, plain_digits);
        Ok(capitalize_first(&text))
    }
}

/// The language-keyed dispatch table. Requesting a language with no
/// registered analyzer is fatal for that run only.
#[derive(Default)]
pub struct MorphologicalRealizer {
    analyzers: FxHashMap<String, Box<dyn MorphologicalAnalyzer>>,
}

impl MorphologicalRealizer {
    pub fn new() -> MorphologicalRealizer {
        MorphologicalRealizer::default()
    }

    /// Registers (or replaces) the analyzer for a language.
    pub fn register(&mut self, language: impl Into<String>, analyzer: Box<dyn MorphologicalAnalyzer>) {
        self.analyzers.insert(language.into(), analyzer);
    }

    pub fn supports(&self, language: &str) -> bool {
        self.analyzers.contains_key(language)
    }

    pub fn realize(
        &self,
        language: &str,
        data: &LanguageData,
        text: &str,
    ) -> Result<String, MorphError> {
        let analyzer = self
            .analyzers
            .get(language)
            .ok_or_else(|| MorphError::UnsupportedLanguage(language.to_string()))?;
        analyzer.inflect(text, &MorphContext { language, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> LanguageData {
        LanguageData::embedded().unwrap()
    }

    fn realizer() -> MorphologicalRealizer {
        let mut m = MorphologicalRealizer::new();
        m.register("en", Box::new(EnglishAnalyzer));
        m.register("fi", Box::new(FinnishAnalyzer));
        m.register("de", Box::new(PassThroughAnalyzer));
        m
    }

    #[test]
    fn english_spells_small_cardinals() {
        let data = data();
        let out = realizer()
            .realize("en", &data, "a model with [CARDINAL:5] topics")
            .unwrap();
        assert_eq!(out, "A model with five topics");
    }

    #[test]
    fn english_spells_small_ordinals() {
        let data = data();
        let out = realizer()
            .realize("en", &data, "the [ORDINAL:3] group")
            .unwrap();
        assert_eq!(out, "The third group");
    }

    #[test]
    fn english_large_numerals_keep_digits() {
        let data = data();
        let out = realizer()
            .realize("en", &data, "the [ORDINAL:21] run of [CARDINAL:40] runs")
            .unwrap();
        assert_eq!(out, "The 21st run of 40 runs");
    }

    #[test]
    fn english_ordinal_suffixes() {
        assert_eq!(english_ordinal_suffix("1"), "1st");
        assert_eq!(english_ordinal_suffix("2"), "2nd");
        assert_eq!(english_ordinal_suffix("3"), "3rd");
        assert_eq!(english_ordinal_suffix("4"), "4th");
        assert_eq!(english_ordinal_suffix("11"), "11th");
        assert_eq!(english_ordinal_suffix("12"), "12th");
        assert_eq!(english_ordinal_suffix("13"), "13th");
        assert_eq!(english_ordinal_suffix("22"), "22nd");
    }

    #[test]
    fn english_indefinite_article_agreement() {
        let data = data();
        let out = realizer()
            .realize("en", &data, "a analysis of a corpus")
            .unwrap();
        assert_eq!(out, "An analysis of a corpus");
    }

    #[test]
    fn finnish_numerals_fall_back_to_digits() {
        let data = data();
        let out = realizer()
            .realize("fi", &data, "aihemalliin, jossa on [CARDINAL:5] aihetta")
            .unwrap();
        assert_eq!(out, "Aihemalliin, jossa on 5 aihetta");
    }

    #[test]
    fn finnish_leaves_sentences_alone() {
        let data = data();
        let text = "Tämä tehtiin koska alkuperäinen kokoelma oli suhteellisen pieni, mikä rajoittaa käytettävissä olevia analyysityökaluja.";
        let out = realizer().realize("fi", &data, text).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn unsupported_language_is_an_error() {
        let data = data();
        let err = realizer().realize("sv", &data, "text").unwrap_err();
        assert!(matches!(err, MorphError::UnsupportedLanguage(lang) if lang == "sv"));
    }

    #[test]
    fn analyzers_can_be_replaced() {
        struct Shouting;
        impl MorphologicalAnalyzer for Shouting {
            fn inflect(&self, text: &str, _: &MorphContext<'_>) -> Result<String, MorphError> {
                Ok(text.to_uppercase())
            }
        }
        let data = data();
        let mut m = realizer();
        m.register("en", Box::new(Shouting));
        let out = m.realize("en", &data, "quiet words").unwrap();
        assert_eq!(out, "QUIET WORDS");
    }
}
