/// Language constants — boilerplate, conjunctions, pronoun tables, and
/// numeral spelling tables, loaded from a RON data block.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Boilerplate key for a run that produced no messages at all.
pub const NO_MESSAGES: &str = "no-messages-for-selection";
/// Boilerplate key for a run whose messages were all filtered out.
pub const NO_INTERESTING_MESSAGES: &str = "no-interesting-messages-for-selection";
/// Boilerplate key for any unexpected failure.
pub const GENERAL_ERROR: &str = "general-error";
/// Boilerplate key for a fact with no matching template.
pub const NO_TEMPLATE: &str = "no-template";

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Grammatical case of a pronominal or named reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammaticalCase {
    Subject,
    Genitive,
    Accusative,
}

impl GrammaticalCase {
    pub fn parse(s: &str) -> Option<GrammaticalCase> {
        match s {
            "subject" => Some(Self::Subject),
            "genitive" => Some(Self::Genitive),
            "accusative" => Some(Self::Accusative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Genitive => "genitive",
            Self::Accusative => "accusative",
        }
    }
}

/// Sentence combiners for one language.
#[derive(Debug, Clone, Deserialize)]
pub struct Conjunctions {
    pub default_combiner: String,
    pub inverse_combiner: String,
}

/// Pronoun forms used for repeated references to a neuter entity.
#[derive(Debug, Clone, Deserialize)]
pub struct PronounForms {
    pub subject: String,
    pub genitive: String,
    pub accusative: String,
}

/// All per-language constants. Populated once at engine build and
/// read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageData {
    pub default_language: String,
    pub conjunctions: HashMap<String, Conjunctions>,
    pub errors: HashMap<String, HashMap<String, String>>,
    pub pronouns: HashMap<String, PronounForms>,
    /// Pattern (`{}` is the name) rendering a first-mention genitive.
    pub genitive_names: HashMap<String, String>,
    pub ordinals: HashMap<String, HashMap<String, String>>,
    pub cardinals: HashMap<String, HashMap<String, String>>,
    pub language_names: HashMap<String, HashMap<String, String>>,
}

impl LanguageData {
    /// The data block compiled into the crate.
    pub fn embedded() -> Result<LanguageData, LanguageError> {
        Self::parse_ron(EMBEDDED_LANGUAGE_DATA)
    }

    /// Parse a language data block from a RON string.
    pub fn parse_ron(input: &str) -> Result<LanguageData, LanguageError> {
        Ok(ron::from_str(input)?)
    }

    /// Load a language data block from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<LanguageData, LanguageError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Localized boilerplate for an error key, falling back to the
    /// default language when the requested one has no entry.
    pub fn error_message(&self, language: &str, key: &str) -> String {
        if let Some(text) = self.errors.get(language).and_then(|m| m.get(key)) {
            return text.clone();
        }
        if let Some(text) = self
            .errors
            .get(&self.default_language)
            .and_then(|m| m.get(key))
        {
            return text.clone();
        }
        format!("[missing boilerplate '{}']", key)
    }

    pub fn pronoun(&self, language: &str, case: GrammaticalCase) -> Option<&str> {
        let forms = self.pronouns.get(language)?;
        Some(match case {
            GrammaticalCase::Subject => &forms.subject,
            GrammaticalCase::Genitive => &forms.genitive,
            GrammaticalCase::Accusative => &forms.accusative,
        })
    }

    /// Renders a full entity name in the genitive, or the bare name when
    /// the language has no genitive pattern.
    pub fn genitive_name(&self, language: &str, name: &str) -> String {
        match self.genitive_names.get(language) {
            Some(pattern) => pattern.replace("{}", name),
            None => name.to_string(),
        }
    }

    pub fn ordinal(&self, language: &str, digits: &str) -> Option<&str> {
        self.ordinals
            .get(language)
            .and_then(|m| m.get(digits))
            .map(String::as_str)
    }

    pub fn cardinal(&self, language: &str, digits: &str) -> Option<&str> {
        self.cardinals
            .get(language)
            .and_then(|m| m.get(digits))
            .map(String::as_str)
    }

    pub fn default_combiner(&self, language: &str) -> Option<&str> {
        self.conjunctions
            .get(language)
            .map(|c| c.default_combiner.as_str())
    }
}

const EMBEDDED_LANGUAGE_DATA: &str = r##"(
    default_language: "en",
    conjunctions: {
        "en": (default_combiner: "and", inverse_combiner: "but"),
        "fi": (default_combiner: "ja", inverse_combiner: "mutta"),
        "de": (default_combiner: "und", inverse_combiner: "aber"),
        "fr": (default_combiner: "et", inverse_combiner: "mais"),
    },
    errors: {
        "en": {
            "no-messages-for-selection": "<p>The reporter is unable to produce a report on your selection.</p>",
            "no-interesting-messages-for-selection": "<p>Your selection contained nothing worth reporting.</p>",
            "general-error": "<p>Something went wrong. Please try again later.</p>",
            "no-template": "[<i>I don't know how to express my thoughts here</i>]",
        },
        "fi": {
            "no-messages-for-selection": "<p>Raportoija ei pysty tuottamaan raporttia valinnastasi.</p>",
            "no-interesting-messages-for-selection": "<p>Valinnastasi ei löytynyt raportoitavaa.</p>",
            "general-error": "<p>Jokin meni vikaan. Yritä myöhemmin uudelleen.</p>",
            "no-template": "[<i>En osaa ilmaista ajatustani tässä</i>]",
        },
        "de": {
            "no-messages-for-selection": "<p>Für Ihre Auswahl kann kein Bericht erstellt werden.</p>",
            "no-interesting-messages-for-selection": "<p>Ihre Auswahl enthielt nichts Berichtenswertes.</p>",
            "general-error": "<p>Etwas ist schiefgelaufen. Bitte versuchen Sie es später erneut.</p>",
            "no-template": "[<i>Ich weiß nicht, wie ich meine Gedanken hier ausdrücken soll</i>]",
        },
        "fr": {
            "no-messages-for-selection": "<p>Impossible de produire un rapport sur votre sélection.</p>",
            "no-interesting-messages-for-selection": "<p>Votre sélection ne contenait rien à signaler.</p>",
            "general-error": "<p>Une erreur s'est produite. Veuillez réessayer plus tard.</p>",
            "no-template": "[<i>Je ne sais pas comment exprimer mes pensées ici</i>]",
        },
    },
    pronouns: {
        "en": (subject: "it", genitive: "its", accusative: "it"),
        "fi": (subject: "se", genitive: "sen", accusative: "sitä"),
        "de": (subject: "sie", genitive: "deren", accusative: "sie"),
        "fr": (subject: "elle", genitive: "sa", accusative: "la"),
    },
    genitive_names: {
        "en": "{}'s",
        "fi": "{}n",
        "de": "von {}",
        "fr": "de {}",
    },
    ordinals: {
        "en": {
            "1": "first", "2": "second", "3": "third", "4": "fourth",
            "5": "fifth", "6": "sixth", "7": "seventh", "8": "eighth",
            "9": "ninth", "10": "tenth", "11": "eleventh", "12": "twelfth",
        },
    },
    cardinals: {
        "en": {
            "1": "one", "2": "two", "3": "three", "4": "four",
            "5": "five", "6": "six", "7": "seven", "8": "eight",
            "9": "nine", "10": "ten", "11": "eleven", "12": "twelve",
        },
    },
    language_names: {
        "en": {"fi": "finnish", "en": "english", "de": "german", "fr": "french"},
        "fi": {"fi": "suomi", "en": "englanti", "de": "saksa", "fr": "ranska"},
        "de": {"fi": "Finnisch", "en": "Englisch", "de": "Deutsch", "fr": "Französisch"},
        "fr": {"fi": "finnois", "en": "anglais", "de": "allemand", "fr": "français"},
    },
)"##;
