//! Annotation pipeline for scraped content.
//!
//! Takes fetcher output through the text filters in `postforge-text`,
//! assigns a sector, and extracts keywords, themes and sentiment. The
//! entry point is [`ContentProcessor`].

pub mod classify;
pub mod cleaner;
pub mod extract;
pub mod insights;
pub mod pipeline;
pub mod sector;
pub mod sentiment;
pub mod tokens;

pub use classify::{Classifier, ClassifyInput, IndicatorRefiner, KeywordBagScorer};
pub use cleaner::{
    Cleaner, CompletionBackend, CompletionRequest, PassthroughCleaner, PromptCleaner,
};
pub use extract::{MAX_KEYWORDS, MAX_THEMES, extract_keywords, extract_themes, rank_by_frequency};
pub use insights::{BatchInsights, extract_insights};
pub use pipeline::{ContentProcessor, PipelineOptions, Resources, validate_content};
pub use sector::{SectorProfile, pick_sector};
pub use sentiment::SentimentLexicon;
pub use tokens::{LanguageModel, Lemmatizer};
