//! Record pipeline: raw text → filter chain → optional cleaner → analysis.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, instrument, warn};

use postforge_shared::{
    AppConfig, ClassificationStrategy, ContentRecord, PostforgeError, RawContent, Result, Sector,
};
use postforge_text::{dedup_sentences, prefilter};

use crate::classify::{ClassifyInput, Classifier, IndicatorRefiner, KeywordBagScorer};
use crate::cleaner::{Cleaner, PassthroughCleaner, passthrough_report};
use crate::extract::{extract_keywords, extract_themes};
use crate::sector::SectorProfile;
use crate::sentiment::SentimentLexicon;
use crate::tokens::LanguageModel;

// ---------------------------------------------------------------------------
// Shared resources
// ---------------------------------------------------------------------------

/// Read-only tables loaded once and shared by every processor.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    pub profile: SectorProfile,
    pub language: LanguageModel,
    pub lexicon: SentimentLexicon,
}

impl Resources {
    /// Built-in English tables.
    pub fn english() -> Self {
        Self::default()
    }

    /// Built-in tables with the `[sectors]` overrides from config applied.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let overrides = config.sector_overrides()?;
        Ok(Self {
            profile: SectorProfile::with_overrides(&overrides)?,
            ..Self::default()
        })
    }
}

/// Per-processor switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Which classifier decides the final category.
    pub strategy: ClassificationStrategy,
    /// Whether the cleaning stage runs.
    pub cleaner_enabled: bool,
}

impl From<&AppConfig> for PipelineOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            strategy: config.classification.strategy,
            cleaner_enabled: config.cleaner.enabled,
        }
    }
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

/// Runs records through every stage.
///
/// Stateless apart from the shared [`Resources`], so one processor may be
/// used from several threads.
pub struct ContentProcessor {
    resources: Arc<Resources>,
    options: PipelineOptions,
    cleaner: Box<dyn Cleaner>,
}

impl ContentProcessor {
    pub fn new(resources: Arc<Resources>, options: PipelineOptions) -> Self {
        Self {
            resources,
            options,
            cleaner: Box::new(PassthroughCleaner),
        }
    }

    /// Replace the default passthrough cleaner.
    pub fn with_cleaner(mut self, cleaner: impl Cleaner + 'static) -> Self {
        self.cleaner = Box::new(cleaner);
        self
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Run every stage on one record.
    #[instrument(skip_all, fields(url = %record.url))]
    pub fn process(&self, mut record: ContentRecord) -> Result<ContentRecord> {
        self.ingest(&mut record)?;
        self.clean(&mut record);
        self.analyze(&mut record);
        debug!(
            category = %record.category,
            sentiment = %record.sentiment,
            keywords = record.keywords.len(),
            themes = record.themes.len(),
            "record processed"
        );
        Ok(record)
    }

    /// Filter chain plus sector scoring.
    ///
    /// Sets `cleaned_text` and overwrites `category` with the scorer's
    /// result over the title and the coherent text.
    pub fn ingest(&self, record: &mut ContentRecord) -> Result<()> {
        validate_content(&record.raw_text)?;

        let coherent = prefilter(&record.raw_text);

        let scorer = KeywordBagScorer::new(&self.resources.profile);
        let scored_text = format!("{} {}", record.title, coherent);
        let sector = scorer.classify(&ClassifyInput {
            text: &scored_text,
            keywords: &[],
            prior: record.category,
        });
        debug!(classifier = scorer.name(), %sector, "sector assigned");

        let focused = self.resources.profile.filter_context(&coherent, sector);
        record.cleaned_text = dedup_sentences(&focused);
        record.category = sector;
        Ok(())
    }

    /// Run the cleaner on the filtered text. A failing cleaner leaves the
    /// text as it was.
    pub fn clean(&self, record: &mut ContentRecord) {
        if !self.options.cleaner_enabled {
            return;
        }

        let report = match self
            .cleaner
            .clean(&record.title, &record.cleaned_text, record.category)
        {
            Ok(report) => report,
            Err(e) => {
                warn!(url = %record.url, error = %e, "cleaner failed, keeping filtered text");
                passthrough_report(&record.cleaned_text)
            }
        };
        record.cleaner = Some(report);
    }

    /// Keywords, themes, sentiment and the final category.
    ///
    /// Reads [`ContentRecord::analysis_text`]. Blank text yields empty lists
    /// and `neutral`; the category is left alone.
    pub fn analyze(&self, record: &mut ContentRecord) {
        let text = record.analysis_text().to_string();
        if text.trim().is_empty() {
            warn!(url = %record.url, "no text left to analyze");
            record.keywords.clear();
            record.themes.clear();
            record.sentiment = Default::default();
            return;
        }

        let language = &self.resources.language;
        let tokens = language.filtered_tokens(&text);
        record.keywords = extract_keywords(&tokens);
        record.themes = extract_themes(&text, language);
        record.sentiment = self.resources.lexicon.classify(&tokens);
        record.category = self.final_category(&text, &record.keywords, record.category);
    }

    fn final_category(&self, text: &str, keywords: &[String], prior: Sector) -> Sector {
        match self.options.strategy {
            ClassificationStrategy::Score => prior,
            ClassificationStrategy::Refine => {
                let refined = IndicatorRefiner.classify(&ClassifyInput {
                    text,
                    keywords,
                    prior,
                });
                if refined != prior {
                    debug!(from = %prior, to = %refined, "category refined");
                }
                refined
            }
        }
    }

    // -----------------------------------------------------------------------
    // Batches
    // -----------------------------------------------------------------------

    /// Process records independently. A record that fails is logged and
    /// returned as it came in; output length and order match the input.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn process_batch(&self, records: Vec<ContentRecord>) -> Vec<ContentRecord> {
        let start = Instant::now();
        let mut failed = 0usize;

        let processed: Vec<ContentRecord> = records
            .into_iter()
            .map(|record| match self.process(record.clone()) {
                Ok(done) => done,
                Err(e) => {
                    failed += 1;
                    error!(url = %record.url, error = %e, "record failed, passing it through");
                    record
                }
            })
            .collect();

        info!(
            total = processed.len(),
            failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch processed"
        );
        processed
    }

    /// [`process_batch`](Self::process_batch) over fetcher output.
    pub fn process_raw_batch(&self, raw: Vec<RawContent>) -> Vec<ContentRecord> {
        self.process_batch(raw.into_iter().map(ContentRecord::from).collect())
    }
}

/// Reject text that shows a broken decode or binary junk: replacement
/// characters and control characters other than tab and line breaks.
pub fn validate_content(text: &str) -> Result<()> {
    let bad = text
        .char_indices()
        .find(|(_, c)| *c == '\u{FFFD}' || (c.is_control() && !matches!(c, '\t' | '\n' | '\r')));

    match bad {
        Some((offset, c)) => Err(PostforgeError::malformed(format!(
            "unexpected character {c:?} at byte {offset}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use postforge_shared::{Sector, Sentiment};

    use super::*;
    use crate::extract::{MAX_KEYWORDS, MAX_THEMES};

    fn processor(strategy: ClassificationStrategy) -> ContentProcessor {
        ContentProcessor::new(
            Arc::new(Resources::english()),
            PipelineOptions {
                strategy,
                cleaner_enabled: false,
            },
        )
    }

    fn record(url: &str, title: &str, content: &str) -> ContentRecord {
        ContentRecord::from(RawContent {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            category: Sector::General,
        })
    }

    #[test]
    fn end_to_end_contact_details_removed() {
        let input = record(
            "https://example.com/ev",
            "",
            "Electric vehicle battery prices are falling. Contact us at info@x.com. Call 555-123-4567.",
        );
        let out = processor(ClassificationStrategy::Refine).process(input).unwrap();

        assert!(out.cleaned_text.starts_with("Electric vehicle battery prices are falling."));
        assert!(!out.cleaned_text.contains('@'));
        assert!(!out.cleaned_text.contains("555"));
        assert_eq!(out.category, Sector::EMobility);
        assert_eq!(&out.keywords[..3], ["electric", "vehicle", "battery"]);
        assert_eq!(out.themes[0], "electric vehicle");
        assert_eq!(out.sentiment, Sentiment::Neutral);
        assert!(out.cleaner.is_none());
    }

    #[test]
    fn present_tense_news_survives_filtering() {
        let input = record(
            "https://example.com/policy",
            "",
            "Regulators approve the new battery regulation. Automakers welcome the policy. Investors fear a slowdown.",
        );
        let out = processor(ClassificationStrategy::Refine).process(input).unwrap();

        assert!(out.cleaned_text.contains("Regulators approve the new battery regulation."));
        assert!(!out.keywords.is_empty());
        assert!(out.keywords.contains(&"regulator".to_string()));
    }

    #[test]
    fn ingest_scores_before_context_filter() {
        let mut input = record(
            "https://example.com/ev",
            "",
            "Electric vehicle battery prices are falling. Weather stayed mild this week.",
        );
        processor(ClassificationStrategy::Refine).ingest(&mut input).unwrap();

        assert_eq!(input.category, Sector::EMobility);
        assert_eq!(input.cleaned_text, "Electric vehicle battery prices are falling.");
    }

    #[test]
    fn empty_content_is_not_an_error() {
        let out = processor(ClassificationStrategy::Refine)
            .process(record("https://example.com/empty", "", "   "))
            .unwrap();

        assert!(out.cleaned_text.is_empty());
        assert!(out.keywords.is_empty());
        assert!(out.themes.is_empty());
        assert_eq!(out.sentiment, Sentiment::Neutral);
        assert_eq!(out.category, Sector::General);
    }

    #[test]
    fn keyword_and_theme_limits_hold_for_large_input() {
        let sentence = |i: usize| {
            format!("Engineers at plant{i} tested robot{i} arms and sensor{i} modules yesterday.")
        };
        let content: Vec<String> = (0..60).map(sentence).collect();
        let out = processor(ClassificationStrategy::Refine)
            .process(record("https://example.com/big", "", &content.join(" ")))
            .unwrap();

        assert_eq!(out.keywords.len(), MAX_KEYWORDS);
        assert_eq!(out.themes.len(), MAX_THEMES);
    }

    #[test]
    fn refine_overrides_scorer_and_score_does_not() {
        let content = "The government passed a new policy on electric grids. Parliament approved the regulation.";

        let refined = processor(ClassificationStrategy::Refine)
            .process(record("https://example.com/gov", "", content))
            .unwrap();
        assert!(refined.keywords.contains(&"electric".to_string()));
        assert_eq!(refined.category, Sector::EMobility);

        let scored = processor(ClassificationStrategy::Score)
            .process(record("https://example.com/gov", "", content))
            .unwrap();
        assert_eq!(scored.category, Sector::PoliticsGovernance);
    }

    #[test]
    fn analyze_alone_uses_prior_category() {
        let mut input = record("https://example.com/a", "", "");
        input.category = Sector::StartupInnovation;
        input.cleaned_text = "Weather forecasts predicted heavy snow.".into();

        processor(ClassificationStrategy::Refine).analyze(&mut input);
        assert_eq!(input.category, Sector::StartupInnovation);
        assert!(input.keywords.contains(&"weather".to_string()));
    }

    #[test]
    fn validate_content_rejects_broken_text() {
        assert!(validate_content("Fine text\twith tabs\nand lines.").is_ok());
        assert!(matches!(
            validate_content("Broken \u{FFFD} decode"),
            Err(PostforgeError::MalformedContent { .. })
        ));
        assert!(validate_content("bell \u{0007} char").is_err());
    }

    #[test]
    fn batch_passes_failing_record_through() {
        let records = vec![
            record(
                "https://example.com/0",
                "Battery news",
                "Electric vehicle battery prices are falling.",
            ),
            record("https://example.com/1", "Broken", "Policy \u{0000} text was cut."),
            record(
                "https://example.com/2",
                "Factories",
                "Manufacturing plants are adding robotics to the production line.",
            ),
        ];
        let original = records.clone();

        let out = processor(ClassificationStrategy::Refine).process_batch(records);

        assert_eq!(out.len(), 3);
        assert_eq!(out[1], original[1]);
        assert_eq!(out[0].url, original[0].url);
        assert_eq!(out[0].category, Sector::EMobility);
        assert!(!out[0].keywords.is_empty());
        assert_eq!(out[2].url, original[2].url);
        assert_eq!(out[2].category, Sector::Manufacturing);
        assert!(!out[2].cleaned_text.is_empty());
    }

    #[test]
    fn raw_fixture_batch_keeps_length_and_order() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/raw_content.fixture.json")
            .expect("read fixture");
        let raw: Vec<RawContent> = serde_json::from_str(&fixture).expect("parse fixture");
        let originals: Vec<ContentRecord> = raw.iter().cloned().map(ContentRecord::from).collect();

        let out = processor(ClassificationStrategy::Refine).process_raw_batch(raw);

        assert_eq!(out.len(), 3);
        let urls: Vec<&str> = out.iter().map(|r| r.url.as_str()).collect();
        let expected: Vec<&str> = originals.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, expected);

        assert_eq!(out[0].category, Sector::EMobility);
        assert!(!out[0].cleaned_text.contains('@'));
        assert!(!out[0].cleaned_text.contains("555"));
        assert!(out[0].keywords.len() <= MAX_KEYWORDS);

        assert_eq!(out[1], originals[1]);

        assert_eq!(out[2].category, Sector::Manufacturing);
        assert!(!out[2].cleaned_text.contains("https://"));
    }

    struct FailingCleaner;

    impl Cleaner for FailingCleaner {
        fn clean(&self, _title: &str, _text: &str, _sector: Sector) -> Result<postforge_shared::CleanerReport> {
            Err(PostforgeError::cleaner("model offline"))
        }
    }

    struct ShoutingCleaner;

    impl Cleaner for ShoutingCleaner {
        fn clean(&self, _title: &str, text: &str, _sector: Sector) -> Result<postforge_shared::CleanerReport> {
            Ok(postforge_shared::CleanerReport {
                cleaned_text: format!("{text} Startup funding doubled this year."),
                insights: vec!["funding".into()],
                relevance_score: 0.8,
            })
        }
    }

    fn enabled() -> PipelineOptions {
        PipelineOptions {
            strategy: ClassificationStrategy::Score,
            cleaner_enabled: true,
        }
    }

    #[test]
    fn failing_cleaner_degrades_to_passthrough() {
        let processor = ContentProcessor::new(Arc::new(Resources::english()), enabled())
            .with_cleaner(FailingCleaner);
        let out = processor
            .process(record("https://example.com/ev", "", "Electric vehicle battery prices are falling."))
            .unwrap();

        let report = out.cleaner.as_ref().expect("cleaner report");
        assert_eq!(report.cleaned_text, out.cleaned_text);
        assert!(report.insights.is_empty());
        assert_eq!(report.relevance_score, 0.5);
        assert!(!out.keywords.is_empty());
    }

    #[test]
    fn analysis_reads_cleaner_output() {
        let processor = ContentProcessor::new(Arc::new(Resources::english()), enabled())
            .with_cleaner(ShoutingCleaner);
        let out = processor
            .process(record("https://example.com/ev", "", "Electric vehicle battery prices are falling."))
            .unwrap();

        assert!(out.keywords.contains(&"funding".to_string()));
        assert!(!out.cleaned_text.contains("funding"));
    }

    #[test]
    fn options_and_resources_follow_config() {
        let mut config = AppConfig::default();
        config.cleaner.enabled = true;
        config.classification.strategy = ClassificationStrategy::Score;
        config
            .sectors
            .insert("manufacturing".into(), vec!["gigafactory".into()]);

        let options = PipelineOptions::from(&config);
        assert!(options.cleaner_enabled);
        assert_eq!(options.strategy, ClassificationStrategy::Score);

        let resources = Resources::from_config(&config).unwrap();
        assert_eq!(resources.profile.keywords(Sector::Manufacturing), ["gigafactory".to_string()]);

        config.sectors.insert("general".into(), vec!["news".into()]);
        assert!(Resources::from_config(&config).is_err());
    }
}
