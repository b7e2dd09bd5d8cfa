/// The report pipeline — fixed-order orchestration from raw events to
/// final markup, plus the engine builder that assembles the shared
/// read-only context.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::core::entities::EntityNameResolver;
use crate::core::generator::MessageGenerator;
use crate::core::language::{
    LanguageData, LanguageError, GENERAL_ERROR, NO_INTERESTING_MESSAGES, NO_MESSAGES,
};
use crate::core::morphology::{
    EnglishAnalyzer, FinnishAnalyzer, MorphError, MorphologicalAnalyzer, MorphologicalRealizer,
    PassThroughAnalyzer,
};
use crate::core::planner::{DocumentPlanner, PlanError};
use crate::core::selector::TemplateSelector;
use crate::core::slots::{leftover_tokens, SlotError, SlotRealizer};
use crate::core::surface::{SurfaceRealizer, SurfaceStyle};
use crate::core::templates::{TemplateBank, TemplateError};
use crate::resources::{ResourceError, ResourceSet};
use crate::schema::event::{Event, EventId};

/// Requested body markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    UnorderedList,
    OrderedList,
}

impl OutputFormat {
    /// Accepts the wire names (`ul`/`ol`) and the long forms.
    pub fn parse(s: &str) -> Option<OutputFormat> {
        match s {
            "ul" | "unordered" => Some(OutputFormat::UnorderedList),
            "ol" | "ordered" => Some(OutputFormat::OrderedList),
            _ => None,
        }
    }

    fn style(self) -> SurfaceStyle {
        match self {
            OutputFormat::UnorderedList => SurfaceStyle::UnorderedList,
            OutputFormat::OrderedList => SurfaceStyle::OrderedList,
        }
    }
}

/// Stages of one pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Configured,
    MessagesGenerated,
    Planned,
    Selected,
    SlotRealized,
    EntityResolved,
    MorphRealized,
    SurfaceRealized,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::MessagesGenerated => "messages-generated",
            Self::Planned => "planned",
            Self::Selected => "selected",
            Self::SlotRealized => "slot-realized",
            Self::EntityResolved => "entity-resolved",
            Self::MorphRealized => "morph-realized",
            Self::SurfaceRealized => "surface-realized",
        }
    }
}

/// Failures of one pipeline run. The first two are recoverable
/// conditions, not defects; all of them are translated into localized
/// boilerplate at this level, never inside the originating component.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no messages could be generated for the selection")]
    NoMessagesForSelection,
    #[error("no messages were interesting enough to report")]
    NoInterestingMessages,
    #[error("language '{0}' has no loaded template bank")]
    UnsupportedLanguage(String),
    #[error("morphological realization failed: {0}")]
    Morphology(#[from] MorphError),
    #[error("event payload is not valid: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<PlanError> for PipelineError {
    fn from(err: PlanError) -> PipelineError {
        match err {
            PlanError::NoMessagesForSelection => PipelineError::NoMessagesForSelection,
            PlanError::NoInterestingMessages => PipelineError::NoInterestingMessages,
        }
    }
}

impl PipelineError {
    /// Machine-readable error class for the caller.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoMessagesForSelection => "NoMessagesForSelection",
            Self::NoInterestingMessages => "NoInterestingMessages",
            Self::UnsupportedLanguage(_) => "UnsupportedLanguage",
            Self::Morphology(MorphError::UnsupportedLanguage(_)) => "UnsupportedLanguage",
            Self::Morphology(MorphError::Analyzer(_)) => "AnalyzerError",
            Self::Payload(_) => "InvalidPayload",
        }
    }

    fn boilerplate_key(&self) -> &'static str {
        match self {
            Self::NoMessagesForSelection => NO_MESSAGES,
            Self::NoInterestingMessages => NO_INTERESTING_MESSAGES,
            _ => GENERAL_ERROR,
        }
    }

    fn recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoMessagesForSelection | Self::NoInterestingMessages
        )
    }

    /// The error string surfaced to the caller: the bare class for the
    /// recoverable conditions, class plus detail otherwise.
    fn caller_string(&self) -> String {
        if self.recoverable() {
            self.code().to_string()
        } else {
            format!("{}: {}", self.code(), self)
        }
    }
}

/// Engine construction failures.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Slot(#[from] SlotError),
    #[error(transparent)]
    Language(#[from] LanguageError),
}

/// A finished report. The body is always renderable, even on failure.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    pub language: String,
    pub body: String,
    pub headline: Option<String>,
    pub error: Option<String>,
}

/// The shared, read-only context of every pipeline run: template bank,
/// language constants, compiled slot rules, analyzer dispatch, and the
/// PRNG seed. Built once via [`ReportEngine::builder`]; safe to share
/// across concurrent requests because nothing here mutates after build.
pub struct ReportEngine {
    resources: ResourceSet,
    bank: TemplateBank,
    language_data: LanguageData,
    slots: SlotRealizer,
    morphology: MorphologicalRealizer,
    seed: u64,
}

/// Builder for constructing a [`ReportEngine`].
pub struct ReportEngineBuilder {
    resources: Option<ResourceSet>,
    language_data: Option<LanguageData>,
    analyzers: Vec<(String, Box<dyn MorphologicalAnalyzer>)>,
    seed: Option<u64>,
}

impl ReportEngine {
    pub fn builder() -> ReportEngineBuilder {
        ReportEngineBuilder {
            resources: None,
            language_data: None,
            analyzers: Vec::new(),
            seed: None,
        }
    }

    /// The language catalog: exactly the languages a template bank was
    /// loaded for.
    pub fn languages(&self) -> Vec<String> {
        self.bank.languages()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The core-facing entry point: `(body, error_code)`. The body is
    /// renderable markup in every case.
    pub fn run_pipeline(
        &self,
        language: &str,
        format: OutputFormat,
        payload: &str,
    ) -> (String, Option<String>) {
        let report = self.generate(language, format, payload);
        (report.body, report.error)
    }

    /// Runs the body pipeline and, when it succeeds, the reduced
    /// headline pipeline, both against the same seed.
    pub fn generate(&self, language: &str, format: OutputFormat, payload: &str) -> Report {
        info!(language, "starting generation");
        let start = Instant::now();

        let report = match self.prepare(language, payload) {
            Ok(events) => match self.run(language, format.style(), &events) {
                Ok(body) => {
                    let headline = match self.run(language, SurfaceStyle::Headline, &events) {
                        Ok(text) => Some(text),
                        Err(err) => {
                            warn!(%err, "headline pipeline failed, omitting headline");
                            None
                        }
                    };
                    Report {
                        language: language.to_string(),
                        body,
                        headline,
                        error: None,
                    }
                }
                Err(err) => self.error_report(language, &err),
            },
            Err(err) => self.error_report(language, &err),
        };

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            failed = report.error.is_some(),
            "generation complete"
        );
        report
    }

    fn prepare(&self, language: &str, payload: &str) -> Result<Vec<Event>, PipelineError> {
        if !self.bank.has_language(language) {
            return Err(PipelineError::UnsupportedLanguage(language.to_string()));
        }
        Ok(parse_events(payload)?)
    }

    /// One pipeline instance: fresh per-run components threaded in fixed
    /// stage order. No retries; a failing stage aborts this run only.
    fn run(
        &self,
        language: &str,
        style: SurfaceStyle,
        events: &[Event],
    ) -> Result<String, PipelineError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        debug!(stage = Stage::Configured.as_str(), seed = self.seed);

        let messages = MessageGenerator::new(&self.resources).generate(events);
        debug!(stage = Stage::MessagesGenerated.as_str(), count = messages.len());

        let plan = DocumentPlanner::new().plan(messages)?;
        debug!(stage = Stage::Planned.as_str(), count = plan.len());

        let selector = TemplateSelector::new(&self.bank, &self.language_data);
        let mut realized = selector.select(&plan, language, &mut rng);
        debug!(stage = Stage::Selected.as_str());

        realized.map_texts(&mut |text| self.slots.realize(language, text));
        debug!(stage = Stage::SlotRealized.as_str());

        let mut resolver = EntityNameResolver::new(&self.language_data);
        realized.map_texts(&mut |text| resolver.resolve(language, text));
        debug!(stage = Stage::EntityResolved.as_str());

        realized.try_map_texts(&mut |text| {
            self.morphology.realize(language, &self.language_data, text)
        })?;
        debug!(stage = Stage::MorphRealized.as_str());

        for text in realized.texts() {
            let leftover = leftover_tokens(text);
            if !leftover.is_empty() {
                // Left in the output on purpose: broken text is visible,
                // silently dropped text is not.
                warn!(?leftover, "unconsumed placeholder tokens in output");
            }
        }

        let body = SurfaceRealizer::new(style).realize(&realized);
        debug!(stage = Stage::SurfaceRealized.as_str());
        Ok(body)
    }

    fn error_report(&self, language: &str, err: &PipelineError) -> Report {
        if err.recoverable() {
            info!(%err, "pipeline ended without content");
        } else {
            error!(%err, "pipeline failed");
        }
        Report {
            language: language.to_string(),
            body: self
                .language_data
                .error_message(language, err.boilerplate_key()),
            headline: None,
            error: Some(err.caller_string()),
        }
    }
}

impl ReportEngineBuilder {
    /// Pins the PRNG seed, for repeatable output.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the standard resource roster.
    pub fn with_resources(mut self, resources: ResourceSet) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Replaces the embedded language data block.
    pub fn with_language_data(mut self, data: LanguageData) -> Self {
        self.language_data = Some(data);
        self
    }

    /// Registers (or overrides) the morphological analyzer for one
    /// language. Built-in defaults cover every bank language.
    pub fn with_analyzer(
        mut self,
        language: impl Into<String>,
        analyzer: Box<dyn MorphologicalAnalyzer>,
    ) -> Self {
        self.analyzers.push((language.into(), analyzer));
        self
    }

    pub fn build(self) -> Result<ReportEngine, BuildError> {
        let resources = match self.resources {
            Some(set) => set,
            None => ResourceSet::standard()?,
        };
        let language_data = match self.language_data {
            Some(data) => data,
            None => LanguageData::embedded()?,
        };

        let bank = resources.template_bank()?;
        let slots = SlotRealizer::compile(&resources.slot_rule_specs())?;

        let mut morphology = MorphologicalRealizer::new();
        for language in bank.languages() {
            match language.as_str() {
                "en" => morphology.register(language, Box::new(EnglishAnalyzer)),
                "fi" => morphology.register(language, Box::new(FinnishAnalyzer)),
                _ => morphology.register(language, Box::new(PassThroughAnalyzer)),
            }
        }
        for (language, analyzer) in self.analyzers {
            morphology.register(language, analyzer);
        }

        let seed = match self.seed {
            Some(seed) => {
                info!(seed, "using preset seed");
                seed
            }
            None => {
                let seed: u64 = rand::thread_rng().gen();
                info!(seed, "no preset seed, drew a random one");
                seed
            }
        };

        info!(
            languages = ?bank.languages(),
            templates = bank.len(),
            "report engine initialized"
        );

        Ok(ReportEngine {
            resources,
            bank,
            language_data,
            slots,
            morphology,
            seed,
        })
    }
}

/// Accepts a JSON array of events or a single event object. Events that
/// arrive without an id get a position-derived one, so every fact still
/// traces back to its source.
fn parse_events(payload: &str) -> Result<Vec<Event>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let mut events: Vec<Event> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };
    for (index, event) in events.iter_mut().enumerate() {
        if event.id.is_none() {
            event.id = Some(EventId(format!("event-{}", index)));
        }
    }
    Ok(events)
}
