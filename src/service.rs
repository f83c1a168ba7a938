//! The summarization pipeline
//!
//! [`MedliteService`] is built once from [`Config`] and then shared by
//! reference. Nothing in it changes after construction.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cli::config::{Config, TranslationOrder};
use crate::errors::{InputError, Result};
use crate::findings::FindingExtractor;
use crate::report::{Report, Summary};
use crate::summarizer::orchestrator::SummarizerConfig;
use crate::summarizer::{load_backend, BackendSlot, Summarizer};
use crate::terms::{TermMap, TermTranslator};
use crate::text::{clean_report_text, word_count};

/// Pipeline settings that are not owned by a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub order: TranslationOrder,
    pub min_input_chars: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            order: TranslationOrder::AfterSummary,
            min_input_chars: 50,
        }
    }
}

/// Translator, summarizer and finding extractor wired together
#[derive(Debug)]
pub struct MedliteService {
    translator: TermTranslator,
    summarizer: Summarizer,
    extractor: FindingExtractor,
    options: PipelineOptions,
}

impl MedliteService {
    /// Build from configuration, loading the term table and both backends
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut terms = TermMap::builtin()?;
        if let Some(glossary) = config.glossary_path() {
            terms = terms.with_glossary_file(&glossary)?;
            info!(path = %glossary.display(), terms = terms.len(), "Loaded glossary");
        }

        let summarizer = Summarizer::new(
            load_backend(&config.models.primary_model),
            load_backend(&config.models.fallback_model),
            config.summarizer(),
        );

        Ok(Self::new(
            TermTranslator::new(terms)?,
            summarizer,
            FindingExtractor::new(config.limits.max_findings),
            PipelineOptions {
                order: config.translation.order,
                min_input_chars: config.limits.min_input_chars,
            },
        ))
    }

    /// Build from already constructed parts
    pub fn new(
        translator: TermTranslator,
        summarizer: Summarizer,
        extractor: FindingExtractor,
        options: PipelineOptions,
    ) -> Self {
        Self {
            translator,
            summarizer,
            extractor,
            options,
        }
    }

    /// Built-in term table with the given backend slots and limits
    pub fn with_backends(
        primary: BackendSlot,
        fallback: BackendSlot,
        limits: SummarizerConfig,
    ) -> Result<Self> {
        Ok(Self::new(
            TermTranslator::new(TermMap::builtin()?)?,
            Summarizer::new(primary, fallback, limits),
            FindingExtractor::default(),
            PipelineOptions::default(),
        ))
    }

    pub fn translator(&self) -> &TermTranslator {
        &self.translator
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Summarize a report
    pub fn generate_summary(&self, report: &Report) -> Result<Summary> {
        let cleaned = clean_report_text(report.text());
        let chars = cleaned.chars().count();
        if chars == 0 {
            return Err(InputError::Empty.into());
        }
        if chars < self.options.min_input_chars {
            return Err(InputError::TooShort {
                chars,
                min: self.options.min_input_chars,
            }
            .into());
        }

        debug!(report = report.name(), chars, "Cleaned report");

        let order = self.options.order;
        let draft = match order {
            TranslationOrder::BeforeSummary => self
                .summarizer
                .summarize_with(&cleaned, |window| self.translator.translate(window).into_owned())?,
            TranslationOrder::AfterSummary => self.summarizer.summarize(&cleaned)?,
        };

        let body = match order {
            TranslationOrder::BeforeSummary => draft.text.clone(),
            TranslationOrder::AfterSummary => self.translator.translate(&draft.text).into_owned(),
        };

        // Untranslated words of the window the backend saw
        let key_findings = self.extractor.extract(&draft.processed_input);

        info!(
            report = report.name(),
            backend = %draft.role,
            model = %draft.model,
            confidence = %draft.confidence,
            findings = key_findings.len(),
            "Summary generated"
        );

        Ok(Summary {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            body,
            technical_summary: draft.text,
            key_findings,
            backend: draft.role,
            model: draft.model,
            confidence: draft.confidence,
            truncated: draft.truncated,
            warnings: draft.warnings,
            input_words: word_count(&draft.processed_input),
        })
    }

    /// Translate jargon in `text`
    pub fn translate(&self, text: &str) -> String {
        self.translator.translate(text).into_owned()
    }

    /// Extract key findings from `text` after cleaning it
    pub fn findings(&self, text: &str) -> Vec<String> {
        self.extractor.extract(&clean_report_text(text))
    }
}
