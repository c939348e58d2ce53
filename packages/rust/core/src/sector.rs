//! Sector keyword profile, keyword-bag scoring, and sector-focused
//! sentence filtering.
//!
//! The same keyword table drives two different matchers: scoring counts
//! word-boundary matches, while the context filter keeps any sentence that
//! contains a keyword as a plain substring.

use regex::Regex;
use tracing::debug;

use postforge_shared::{PostforgeError, Result, Sector};
use postforge_text::{join_sentences, split_sentences};

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Built-in keyword phrases per sector, in declared (tie-break) order.
const DEFAULT_KEYWORDS: [(Sector, &[&str]); 5] = [
    (
        Sector::EMobility,
        &[
            "electric vehicle",
            "ev",
            "battery",
            "charging station",
            "autonomous driving",
            "sustainable mobility",
            "green energy",
            "renewable transport",
            "electric car",
            "lithium-ion",
            "vehicle electrification",
            "smart mobility",
            "e-mobility",
        ],
    ),
    (
        Sector::Manufacturing,
        &[
            "manufacturing",
            "supply chain",
            "automation",
            "industry 4.0",
            "robotics",
            "production line",
            "factory automation",
            "industrial iot",
            "smart manufacturing",
            "lean manufacturing",
            "quality control",
            "production efficiency",
        ],
    ),
    (
        Sector::PoliticsGovernance,
        &[
            "government",
            "policy",
            "regulation",
            "election",
            "legislation",
            "parliament",
            "political",
            "governance",
            "public sector",
            "democracy",
            "constitution",
            "minister",
            "president",
            "law",
            "bill",
            "senate",
        ],
    ),
    (
        Sector::AiMl,
        &[
            "artificial intelligence",
            "machine learning",
            "deep learning",
            "neural network",
            "data science",
            "ai model",
            "computer vision",
            "natural language processing",
            "predictive analytics",
            "algorithm",
            "automation ai",
        ],
    ),
    (
        Sector::StartupInnovation,
        &[
            "startup",
            "innovation",
            "venture capital",
            "tech startup",
            "business model",
            "entrepreneurship",
            "funding round",
            "pitch deck",
            "scalability",
            "disruption",
        ],
    ),
];

/// One sector's phrases with their compiled word-boundary matchers.
#[derive(Debug, Clone)]
struct SectorEntry {
    sector: Sector,
    phrases: Vec<String>,
    matchers: Vec<Regex>,
}

impl SectorEntry {
    fn new(sector: Sector, phrases: Vec<String>) -> Result<Self> {
        let matchers = phrases
            .iter()
            .map(|phrase| {
                Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).map_err(|e| {
                    PostforgeError::config(format!("bad keyword `{phrase}` for {sector}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sector,
            phrases,
            matchers,
        })
    }
}

/// Immutable mapping from each specific sector to its keyword phrases.
///
/// Built once at startup and shared read-only; iteration order is the
/// declared sector order.
#[derive(Debug, Clone)]
pub struct SectorProfile {
    entries: Vec<SectorEntry>,
}

impl SectorProfile {
    /// The built-in English keyword table.
    pub fn builtin() -> Self {
        let entries = DEFAULT_KEYWORDS
            .iter()
            .map(|(sector, phrases)| {
                let phrases = phrases.iter().map(|p| (*p).to_string()).collect();
                SectorEntry::new(*sector, phrases)
            })
            .collect::<Result<Vec<_>>>()
            .expect("valid builtin keywords");

        Self { entries }
    }

    /// The built-in table with some sectors' phrase lists replaced.
    ///
    /// Declared order is kept regardless of override order.
    pub fn with_overrides(overrides: &[(Sector, Vec<String>)]) -> Result<Self> {
        let mut profile = Self::builtin();
        for (sector, phrases) in overrides {
            if sector.is_general() {
                return Err(PostforgeError::config(
                    "the `general` sector cannot carry keywords",
                ));
            }
            let phrases: Vec<String> = phrases.iter().map(|p| p.to_lowercase()).collect();
            let entry = SectorEntry::new(*sector, phrases)?;
            if let Some(slot) = profile.entries.iter_mut().find(|e| e.sector == *sector) {
                *slot = entry;
            }
        }
        Ok(profile)
    }

    /// Keyword phrases for a sector; empty for `general`.
    pub fn keywords(&self, sector: Sector) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.sector == sector)
            .map(|e| e.phrases.as_slice())
            .unwrap_or(&[])
    }

    /// Sectors in declared order.
    pub fn sectors(&self) -> impl Iterator<Item = Sector> + '_ {
        self.entries.iter().map(|e| e.sector)
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    /// Count non-overlapping, word-boundary matches of every phrase per
    /// sector, in declared order. `text` is lowercased here.
    pub fn score(&self, text: &str) -> Vec<(Sector, usize)> {
        let haystack = text.to_lowercase();
        self.entries
            .iter()
            .map(|entry| {
                let score = entry
                    .matchers
                    .iter()
                    .map(|re| re.find_iter(&haystack).count())
                    .sum();
                (entry.sector, score)
            })
            .collect()
    }

    /// Score `title + " " + content` and pick a sector.
    pub fn assign(&self, title: &str, content: &str) -> Sector {
        let scores = self.score(&format!("{title} {content}"));
        let sector = pick_sector(&scores);
        debug!(?scores, %sector, "sector scored");
        sector
    }

    // -----------------------------------------------------------------------
    // Context filter
    // -----------------------------------------------------------------------

    /// Keep only sentences that mention one of `sector`'s phrases as a
    /// plain substring.
    ///
    /// `general` leaves the text untouched, and so does a filter that would
    /// keep nothing.
    pub fn filter_context(&self, text: &str, sector: Sector) -> String {
        let phrases = self.keywords(sector);
        if sector.is_general() || phrases.is_empty() {
            return text.to_string();
        }

        let sentences = split_sentences(text);
        let relevant: Vec<&str> = sentences
            .iter()
            .copied()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                phrases.iter().any(|phrase| lower.contains(phrase.as_str()))
            })
            .collect();

        if relevant.is_empty() {
            debug!(%sector, "no sentence matched sector keywords, keeping text");
            return text.to_string();
        }

        debug!(%sector, total = sentences.len(), kept = relevant.len(), "sector context filter");
        join_sentences(&relevant)
    }
}

impl Default for SectorProfile {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Highest score wins. A tie at the top goes to the first sector in
/// declared order when the score is at least 2 and to `general` when it is
/// only 1; all-zero scores are `general`.
pub fn pick_sector(scores: &[(Sector, usize)]) -> Sector {
    let max_score = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
    if max_score == 0 {
        return Sector::General;
    }

    let top: Vec<Sector> = scores
        .iter()
        .filter(|(_, s)| *s == max_score)
        .map(|(sector, _)| *sector)
        .collect();

    match top.as_slice() {
        [only] => *only,
        [first, ..] if max_score >= 2 => *first,
        _ => Sector::General,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(scores: &[(Sector, usize)], sector: Sector) -> usize {
        scores
            .iter()
            .find(|(s, _)| *s == sector)
            .map(|(_, n)| *n)
            .expect("sector present")
    }

    #[test]
    fn builtin_profile_in_declared_order() {
        let profile = SectorProfile::builtin();
        let sectors: Vec<Sector> = profile.sectors().collect();
        assert_eq!(sectors, Sector::SPECIFIC.to_vec());
        assert!(profile.keywords(Sector::General).is_empty());
        assert!(profile.keywords(Sector::EMobility).contains(&"battery".to_string()));
    }

    #[test]
    fn electric_vehicle_and_battery_score_two() {
        let profile = SectorProfile::builtin();
        let scores = profile.score("The electric vehicle needs a bigger battery");
        assert_eq!(score_of(&scores, Sector::EMobility), 2);
        assert_eq!(profile.assign("", "The electric vehicle needs a bigger battery"), Sector::EMobility);
    }

    #[test]
    fn matching_respects_word_boundaries() {
        let profile = SectorProfile::builtin();
        // "ev" inside "every"/"level" and "law" inside "lawn" do not count.
        let scores = profile.score("every level of the lawn");
        assert!(scores.iter().all(|(_, s)| *s == 0));
    }

    #[test]
    fn counts_repeated_phrases() {
        let profile = SectorProfile::builtin();
        let scores = profile.score("Battery, battery and BATTERY.");
        assert_eq!(score_of(&scores, Sector::EMobility), 3);
    }

    #[test]
    fn single_point_tie_goes_to_general() {
        let profile = SectorProfile::builtin();
        // One e-mobility hit, one manufacturing hit.
        assert_eq!(
            profile.assign("", "A battery plant adds robotics"),
            Sector::General
        );
    }

    #[test]
    fn higher_tie_goes_to_first_declared_sector() {
        let scores = [
            (Sector::EMobility, 0),
            (Sector::Manufacturing, 2),
            (Sector::PoliticsGovernance, 2),
            (Sector::AiMl, 0),
            (Sector::StartupInnovation, 0),
        ];
        assert_eq!(pick_sector(&scores), Sector::Manufacturing);
    }

    #[test]
    fn zero_scores_are_general() {
        let profile = SectorProfile::builtin();
        assert_eq!(profile.assign("Weather", "Sunny skies all week."), Sector::General);
        assert_eq!(pick_sector(&[]), Sector::General);
    }

    #[test]
    fn title_contributes_to_score() {
        let profile = SectorProfile::builtin();
        assert_eq!(
            profile.assign("Parliament passes budget", "The vote was close. The law takes effect soon."),
            Sector::PoliticsGovernance
        );
    }

    #[test]
    fn context_filter_uses_plain_substrings() {
        let profile = SectorProfile::builtin();
        let text = "Battery packs got cheaper. Weather was mild. Every driver noticed.";
        // "ev" matches inside "Every" for the context filter.
        assert_eq!(
            profile.filter_context(text, Sector::EMobility),
            "Battery packs got cheaper. Every driver noticed."
        );
    }

    #[test]
    fn context_filter_skips_general_and_empty_results() {
        let profile = SectorProfile::builtin();
        let text = "Weather was mild. Rain is due soon.";
        assert_eq!(profile.filter_context(text, Sector::General), text);
        assert_eq!(profile.filter_context(text, Sector::AiMl), text);
    }

    #[test]
    fn overrides_replace_phrases_and_keep_order() {
        let profile = SectorProfile::with_overrides(&[(
            Sector::Manufacturing,
            vec!["Gigafactory".to_string()],
        )])
        .expect("valid overrides");

        assert_eq!(profile.keywords(Sector::Manufacturing), ["gigafactory".to_string()]);
        let sectors: Vec<Sector> = profile.sectors().collect();
        assert_eq!(sectors, Sector::SPECIFIC.to_vec());
        assert_eq!(profile.assign("", "A new gigafactory opened"), Sector::Manufacturing);
    }

    #[test]
    fn general_override_rejected() {
        let err = SectorProfile::with_overrides(&[(Sector::General, vec!["news".into()])])
            .unwrap_err();
        assert!(err.to_string().contains("general"));
    }
}
