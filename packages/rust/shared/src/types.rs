//! Core domain types for Postforge content records.

use serde::{Deserialize, Serialize};

use crate::error::PostforgeError;

// ---------------------------------------------------------------------------
// Sector
// ---------------------------------------------------------------------------

/// Fixed topical sectors a record can be classified into.
///
/// The serialized literals are part of the persisted draft format and must
/// stay stable. Declaration order is the scorer's tie-break order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Sector {
    #[serde(rename = "e-mobility")]
    EMobility,
    #[serde(rename = "manufacturing")]
    Manufacturing,
    #[serde(rename = "politics-governance")]
    PoliticsGovernance,
    #[serde(rename = "ai-ml")]
    AiMl,
    #[serde(rename = "startup-innovation")]
    StartupInnovation,
    #[default]
    #[serde(rename = "general")]
    General,
}

impl Sector {
    /// Every sector that carries keywords, in declared order. `General` is
    /// the fallback and never scored.
    pub const SPECIFIC: [Sector; 5] = [
        Sector::EMobility,
        Sector::Manufacturing,
        Sector::PoliticsGovernance,
        Sector::AiMl,
        Sector::StartupInnovation,
    ];

    /// The literal string used on disk and in config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EMobility => "e-mobility",
            Self::Manufacturing => "manufacturing",
            Self::PoliticsGovernance => "politics-governance",
            Self::AiMl => "ai-ml",
            Self::StartupInnovation => "startup-innovation",
            Self::General => "general",
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Self::General)
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sector {
    type Err = PostforgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e-mobility" => Ok(Self::EMobility),
            "manufacturing" => Ok(Self::Manufacturing),
            "politics-governance" => Ok(Self::PoliticsGovernance),
            "ai-ml" => Ok(Self::AiMl),
            "startup-innovation" => Ok(Self::StartupInnovation),
            "general" => Ok(Self::General),
            other => Err(PostforgeError::config(format!("unknown sector `{other}`"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Coarse polarity label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RawContent
// ---------------------------------------------------------------------------

/// What a fetcher hands over: one scraped page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawContent {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Optional caller-supplied sector; defaults to `general`.
    #[serde(default)]
    pub category: Sector,
}

// ---------------------------------------------------------------------------
// CleanerReport
// ---------------------------------------------------------------------------

/// Outcome of the optional cleaning stage, kept on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanerReport {
    /// Text produced by the cleaner (or the untouched input on fallback).
    pub cleaned_text: String,
    /// Short key points extracted by the cleaner.
    #[serde(default)]
    pub insights: Vec<String>,
    /// Relevance to the record's sector, in `[0, 1]`.
    pub relevance_score: f32,
}

// ---------------------------------------------------------------------------
// ContentRecord
// ---------------------------------------------------------------------------

/// The unit of work flowing through the pipeline.
///
/// `url`, `title` and `raw_text` are never modified after creation; every
/// other field is filled in by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub url: String,
    pub title: String,
    pub raw_text: String,
    /// Output of the filtering chain (normalize → noise → coherence →
    /// sector context → dedup).
    #[serde(default)]
    pub cleaned_text: String,
    /// Present only when a cleaner participated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaner: Option<CleanerReport>,
    #[serde(default)]
    pub category: Sector,
    /// At most 10, most frequent first.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// At most 5 two-word phrases, most frequent first.
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
}

impl ContentRecord {
    /// Text the analysis stages read: the cleaner's output when one ran,
    /// otherwise the filter-chain output.
    pub fn analysis_text(&self) -> &str {
        self.cleaner
            .as_ref()
            .map(|report| report.cleaned_text.as_str())
            .unwrap_or(&self.cleaned_text)
    }
}

impl From<RawContent> for ContentRecord {
    fn from(raw: RawContent) -> Self {
        Self {
            url: raw.url,
            title: raw.title,
            raw_text: raw.content,
            cleaned_text: String::new(),
            cleaner: None,
            category: raw.category,
            keywords: Vec::new(),
            themes: Vec::new(),
            sentiment: Sentiment::Neutral,
        }
    }
}
