//! Batch-level summary over processed records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use postforge_shared::{ContentRecord, Sector, Sentiment};

use crate::extract::rank_by_frequency;

/// Keywords kept across a batch.
pub const MAX_BATCH_KEYWORDS: usize = 20;

/// Themes kept across a batch.
pub const MAX_BATCH_THEMES: usize = 10;

/// What a batch of records was about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInsights {
    pub total_content: usize,
    pub top_keywords: Vec<String>,
    pub top_themes: Vec<String>,
    pub category_distribution: BTreeMap<Sector, usize>,
    pub sentiment_distribution: BTreeMap<Sentiment, usize>,
    pub generated_at: DateTime<Utc>,
}

/// Aggregate keywords, themes, categories and sentiments of `records`.
///
/// Each record's keyword and theme lists are counted as given, so a term
/// scores once per record that ranked it.
pub fn extract_insights(records: &[ContentRecord]) -> BatchInsights {
    let top_keywords = rank_by_frequency(
        records.iter().flat_map(|r| r.keywords.iter().cloned()),
        MAX_BATCH_KEYWORDS,
    );
    let top_themes = rank_by_frequency(
        records.iter().flat_map(|r| r.themes.iter().cloned()),
        MAX_BATCH_THEMES,
    );

    let mut category_distribution = BTreeMap::new();
    let mut sentiment_distribution = BTreeMap::new();
    for record in records {
        *category_distribution.entry(record.category).or_insert(0) += 1;
        *sentiment_distribution.entry(record.sentiment).or_insert(0) += 1;
    }

    info!(
        total = records.len(),
        keywords = top_keywords.len(),
        themes = top_themes.len(),
        "batch insights extracted"
    );

    BatchInsights {
        total_content: records.len(),
        top_keywords,
        top_themes,
        category_distribution,
        sentiment_distribution,
        generated_at: Utc::now(),
    }
}
