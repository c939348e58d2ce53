//! Sector classification behind one contract.
//!
//! Two strategies exist: the keyword-bag scorer over full text and the
//! indicator refiner over extracted keywords. The processor picks one
//! explicitly via [`ClassificationStrategy`](postforge_shared::ClassificationStrategy)
//! instead of letting the second silently override the first.

use postforge_shared::Sector;

use crate::sector::SectorProfile;

/// Everything a classifier may look at.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    /// Title and body text.
    pub text: &'a str,
    /// Ranked keywords, most frequent first.
    pub keywords: &'a [String],
    /// Sector already known for the record; returned when nothing matches.
    pub prior: Sector,
}

/// A sector classification strategy.
pub trait Classifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn classify(&self, input: &ClassifyInput<'_>) -> Sector;
}

// ---------------------------------------------------------------------------
// Keyword-bag scorer
// ---------------------------------------------------------------------------

/// Word-boundary keyword counting over the text with tie-break rules; see
/// [`SectorProfile::score`].
#[derive(Debug, Clone, Copy)]
pub struct KeywordBagScorer<'p> {
    profile: &'p SectorProfile,
}

impl<'p> KeywordBagScorer<'p> {
    pub fn new(profile: &'p SectorProfile) -> Self {
        Self { profile }
    }
}

impl Classifier for KeywordBagScorer<'_> {
    fn name(&self) -> &'static str {
        "keyword-bag"
    }

    /// Ignores the prior: zero scores mean `general`.
    fn classify(&self, input: &ClassifyInput<'_>) -> Sector {
        crate::sector::pick_sector(&self.profile.score(input.text))
    }
}

// ---------------------------------------------------------------------------
// Indicator refiner
// ---------------------------------------------------------------------------

/// Indicator terms checked in order; the first hit decides.
const INDICATORS: &[(&str, Sector)] = &[
    ("electric", Sector::EMobility),
    ("vehicle", Sector::EMobility),
    ("battery", Sector::EMobility),
    ("manufactur", Sector::Manufacturing),
    ("supply", Sector::Manufacturing),
    ("automation", Sector::Manufacturing),
    ("government", Sector::PoliticsGovernance),
    ("policy", Sector::PoliticsGovernance),
    ("regulation", Sector::PoliticsGovernance),
    ("startup", Sector::StartupInnovation),
    ("entrepreneur", Sector::StartupInnovation),
    ("funding", Sector::StartupInnovation),
    ("ai", Sector::AiMl),
    ("artificial", Sector::AiMl),
    ("intelligence", Sector::AiMl),
];

/// Substring scan of the joined keyword list against fixed indicator terms.
///
/// Matching is plain substring, so `"ai"` also hits words like `"chain"`
/// once the earlier indicators have missed.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorRefiner;

impl Classifier for IndicatorRefiner {
    fn name(&self) -> &'static str {
        "indicator-refiner"
    }

    fn classify(&self, input: &ClassifyInput<'_>) -> Sector {
        let joined = input.keywords.join(" ").to_lowercase();
        INDICATORS
            .iter()
            .find(|(term, _)| joined.contains(term))
            .map(|(_, sector)| *sector)
            .unwrap_or(input.prior)
    }
}
