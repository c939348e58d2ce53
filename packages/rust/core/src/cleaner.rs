//! Optional cleaning stage.
//!
//! The pipeline only sees the [`Cleaner`] trait. [`PassthroughCleaner`] is
//! the no-op used by default and in tests; [`PromptCleaner`] builds a
//! sector-focused editing prompt and hands it to a [`CompletionBackend`],
//! which owns the actual network client. With `sector_pass` set it follows
//! up with a second, stricter prompt that trims off-sector content.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use postforge_shared::{CleanerConfig, CleanerReport, PostforgeError, Result, Sector};

/// Relevance reported when the cleaner cannot say anything better.
pub const NEUTRAL_RELEVANCE: f32 = 0.5;

/// Rewrites record text for one sector.
pub trait Cleaner: Send + Sync {
    fn clean(&self, title: &str, text: &str, sector: Sector) -> Result<CleanerReport>;
}

/// Report for a cleaner that did nothing: text unchanged, no insights.
pub fn passthrough_report(text: &str) -> CleanerReport {
    CleanerReport {
        cleaned_text: text.to_string(),
        insights: Vec::new(),
        relevance_score: NEUTRAL_RELEVANCE,
    }
}

/// Returns the text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCleaner;

impl Cleaner for PassthroughCleaner {
    fn clean(&self, _title: &str, text: &str, _sector: Sector) -> Result<CleanerReport> {
        Ok(passthrough_report(text))
    }
}

// ---------------------------------------------------------------------------
// Completion backend
// ---------------------------------------------------------------------------

/// One chat-style completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Anything that can answer a [`CompletionRequest`] with text.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Prompt cleaner
// ---------------------------------------------------------------------------

const SYSTEM_PROMPT: &str = "You are an expert content editor specializing in professional \
business content. Clean, refine, and enhance scraped web content while keeping it strictly \
relevant to the requested sector.";

const MAX_COMPLETION_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;

const SECTOR_PASS_SYSTEM_PROMPT: &str =
    "You are a sector specialist ensuring content purity and relevance.";
const SECTOR_PASS_MAX_TOKENS: u32 = 1500;
const SECTOR_PASS_TEMPERATURE: f32 = 0.2;

/// Topics the prompt asks the model to stay within.
fn sector_focus(sector: Sector) -> &'static str {
    match sector {
        Sector::EMobility => {
            "electric vehicles, batteries, charging infrastructure, sustainable transportation, autonomous driving"
        }
        Sector::Manufacturing => {
            "industrial automation, supply chain, robotics, Industry 4.0, production processes"
        }
        Sector::PoliticsGovernance => {
            "government policy, regulation, legislation, public administration, political processes"
        }
        Sector::AiMl => {
            "artificial intelligence, machine learning, data science, algorithms, automation"
        }
        Sector::StartupInnovation => {
            "entrepreneurship, venture capital, business models, innovation, startup ecosystem"
        }
        Sector::General => "business, technology, industry trends, professional development",
    }
}

/// Shape of a well-formed model reply.
#[derive(Debug, Deserialize)]
struct CleanerReply {
    cleaned_content: Option<String>,
    #[serde(default)]
    key_insights: Vec<String>,
    relevance_score: Option<f32>,
}

/// Cleaner backed by a language-model completion.
#[derive(Debug, Clone)]
pub struct PromptCleaner<B> {
    backend: B,
    model: String,
    max_prompt_chars: usize,
    sector_pass: bool,
}

impl<B: CompletionBackend> PromptCleaner<B> {
    pub fn new(backend: B, config: &CleanerConfig) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            max_prompt_chars: config.max_prompt_chars,
            sector_pass: config.sector_pass,
        }
    }

    pub fn with_sector_pass(mut self, enabled: bool) -> Self {
        self.sector_pass = enabled;
        self
    }

    pub fn build_prompt(&self, title: &str, text: &str, sector: Sector) -> String {
        let content = truncate_chars(text, self.max_prompt_chars);
        let focus = sector_focus(sector);

        format!(
            "Clean and refine the following scraped web content for professional posting. \
Focus on the {sector} sector.

TITLE: {title}
RAW CONTENT:
{content}

SECTOR FOCUS: {focus}

TASKS:
1. Remove irrelevant content (ads, navigation, contact info, legal text).
2. Keep strictly to {sector} topics.
3. Fix grammar and improve readability.
4. Extract 3-5 key insights.
5. Rate relevance to the {sector} sector from 0.0 to 1.0.

OUTPUT FORMAT (JSON):
{{\"cleaned_content\": \"...\", \"key_insights\": [\"...\"], \"relevance_score\": 0.85}}
"
        )
    }

    pub fn build_sector_prompt(&self, text: &str, sector: Sector) -> String {
        let content = truncate_chars(text, self.max_prompt_chars);

        format!(
            "Analyze the following content and ensure it maintains pure {sector} sector context. \
Remove any content that doesn't directly relate to {sector} topics.

CONTENT:
{content}

Return only the content that is strictly relevant to {sector}, maintaining professional tone.
"
        )
    }

    /// Second pass over already-cleaned text. Any failure keeps `text`.
    fn enforce_sector(&self, text: String, sector: Sector) -> String {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: SECTOR_PASS_SYSTEM_PROMPT.to_string(),
            prompt: self.build_sector_prompt(&text, sector),
            max_tokens: SECTOR_PASS_MAX_TOKENS,
            temperature: SECTOR_PASS_TEMPERATURE,
        };

        match self.backend.complete(&request) {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                warn!("sector pass returned nothing, keeping first-pass text");
                text
            }
            Err(e) => {
                warn!(error = %e, "sector pass failed, keeping first-pass text");
                text
            }
        }
    }
}

impl<B: CompletionBackend> Cleaner for PromptCleaner<B> {
    #[instrument(skip_all, fields(%sector, chars = text.chars().count()))]
    fn clean(&self, title: &str, text: &str, sector: Sector) -> Result<CleanerReport> {
        if text.trim().is_empty() {
            warn!("no content to clean");
            return Ok(CleanerReport {
                cleaned_text: String::new(),
                insights: Vec::new(),
                relevance_score: 0.0,
            });
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: self.build_prompt(title, text, sector),
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        };
        let reply = self.backend.complete(&request)?;
        if reply.trim().is_empty() {
            return Err(PostforgeError::cleaner("completion backend returned an empty reply"));
        }

        let mut report = parse_reply(&reply);
        if self.sector_pass && !report.cleaned_text.trim().is_empty() {
            report.cleaned_text = self.enforce_sector(report.cleaned_text, sector);
        }
        debug!(
            chars = report.cleaned_text.chars().count(),
            insights = report.insights.len(),
            relevance = report.relevance_score,
            "cleaner reply parsed"
        );
        Ok(report)
    }
}

/// Parse a model reply. Replies that are not the expected JSON object are
/// taken verbatim as cleaned text.
pub fn parse_reply(reply: &str) -> CleanerReport {
    let reply = reply.trim();
    match serde_json::from_str::<CleanerReply>(strip_code_fence(reply)) {
        Ok(parsed) => CleanerReport {
            cleaned_text: parsed.cleaned_content.unwrap_or_else(|| reply.to_string()),
            insights: parsed.key_insights,
            relevance_score: clamp_relevance(parsed.relevance_score.unwrap_or(NEUTRAL_RELEVANCE)),
        },
        Err(e) => {
            warn!(error = %e, "cleaner reply is not JSON, using it as plain text");
            CleanerReport {
                cleaned_text: reply.to_string(),
                insights: Vec::new(),
                relevance_score: NEUTRAL_RELEVANCE,
            }
        }
    }
}

fn clamp_relevance(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        NEUTRAL_RELEVANCE
    }
}

/// Drop a surrounding ```` ``` ```` / ```` ```json ```` fence if present.
fn strip_code_fence(reply: &str) -> &str {
    let Some(inner) = reply.strip_prefix("```") else {
        return reply;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Keep at most `max_chars` characters, marking the cut.
fn truncate_chars(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        None => content.to_string(),
        Some((cut, _)) => format!("{}\n[... content truncated ...]", &content[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Backend returning a canned reply and recording prompts.
    struct CannedBackend {
        reply: Result<String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(PostforgeError::cleaner("backend unavailable")),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl CompletionBackend for CannedBackend {
        fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(PostforgeError::cleaner(e.to_string())),
            }
        }
    }

    impl CompletionBackend for &CannedBackend {
        fn complete(&self, request: &CompletionRequest) -> Result<String> {
            (**self).complete(request)
        }
    }

    #[test]
    fn passthrough_keeps_text() {
        let report = PassthroughCleaner
            .clean("T", "Battery prices fell.", Sector::EMobility)
            .unwrap();
        assert_eq!(report.cleaned_text, "Battery prices fell.");
        assert!(report.insights.is_empty());
        assert_eq!(report.relevance_score, NEUTRAL_RELEVANCE);
    }

    #[test]
    fn parses_json_reply() {
        let backend = CannedBackend::replying(
            r#"{"cleaned_content": "EV prices fell.", "key_insights": ["Prices fell"], "relevance_score": 0.9}"#,
        );
        let cleaner = PromptCleaner::new(&backend, &CleanerConfig::default());
        let report = cleaner.clean("EVs", "EV prices fell. Subscribe now.", Sector::EMobility).unwrap();

        assert_eq!(report.cleaned_text, "EV prices fell.");
        assert_eq!(report.insights, vec!["Prices fell".to_string()]);
        assert!((report.relevance_score - 0.9).abs() < f32::EPSILON);

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].model, "gpt-3.5-turbo");
        assert!(seen[0].prompt.contains("SECTOR FOCUS: electric vehicles"));
    }

    /// Backend answering successive calls from a script.
    struct ScriptedBackend {
        replies: Mutex<Vec<Result<String>>>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedBackend {
        fn new(mut replies: Vec<Result<String>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionBackend for &ScriptedBackend {
        fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(PostforgeError::cleaner("script exhausted")))
        }
    }

    const FIRST_PASS_REPLY: &str = r#"{"cleaned_content": "EV prices fell. The mayor opened a park.", "key_insights": ["Prices fell"], "relevance_score": 0.8}"#;

    #[test]
    fn sector_pass_is_off_by_default() {
        let backend = ScriptedBackend::new(vec![Ok(FIRST_PASS_REPLY.to_string())]);
        let cleaner = PromptCleaner::new(&backend, &CleanerConfig::default());
        let report = cleaner.clean("EVs", "EV prices fell.", Sector::EMobility).unwrap();

        assert_eq!(report.cleaned_text, "EV prices fell. The mayor opened a park.");
        assert_eq!(backend.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn sector_pass_replaces_cleaned_text() {
        let backend = ScriptedBackend::new(vec![
            Ok(FIRST_PASS_REPLY.to_string()),
            Ok("  EV prices fell.\n".to_string()),
        ]);
        let config = CleanerConfig {
            sector_pass: true,
            ..CleanerConfig::default()
        };
        let cleaner = PromptCleaner::new(&backend, &config);
        let report = cleaner.clean("EVs", "EV prices fell.", Sector::EMobility).unwrap();

        assert_eq!(report.cleaned_text, "EV prices fell.");
        assert_eq!(report.insights, vec!["Prices fell".to_string()]);
        assert!((report.relevance_score - 0.8).abs() < f32::EPSILON);

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].system, SECTOR_PASS_SYSTEM_PROMPT);
        assert_eq!(seen[1].max_tokens, 1500);
        assert!((seen[1].temperature - 0.2).abs() < f32::EPSILON);
        assert!(seen[1].prompt.contains("pure e-mobility sector context"));
        assert!(seen[1].prompt.contains("The mayor opened a park."));
    }

    #[test]
    fn sector_pass_failure_keeps_first_pass_text() {
        for second in [Err(PostforgeError::cleaner("timeout")), Ok("   ".to_string())] {
            let backend = ScriptedBackend::new(vec![Ok(FIRST_PASS_REPLY.to_string()), second]);
            let cleaner = PromptCleaner::new(&backend, &CleanerConfig::default()).with_sector_pass(true);
            let report = cleaner.clean("EVs", "EV prices fell.", Sector::EMobility).unwrap();

            assert_eq!(report.cleaned_text, "EV prices fell. The mayor opened a park.");
            assert_eq!(backend.seen.lock().unwrap().len(), 2);
        }
    }

    #[test]
    fn sector_pass_skipped_for_empty_first_pass() {
        let backend = ScriptedBackend::new(vec![Ok(
            r#"{"cleaned_content": "", "relevance_score": 0.1}"#.to_string(),
        )]);
        let cleaner = PromptCleaner::new(&backend, &CleanerConfig::default()).with_sector_pass(true);
        let report = cleaner.clean("EVs", "Subscribe now.", Sector::EMobility).unwrap();

        assert!(report.cleaned_text.is_empty());
        assert_eq!(backend.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn fenced_json_reply_is_parsed() {
        let report = parse_reply("```json\n{\"cleaned_content\": \"Robots weld.\", \"relevance_score\": 0.7}\n```");
        assert_eq!(report.cleaned_text, "Robots weld.");
        assert!(report.insights.is_empty());
        assert!((report.relevance_score - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn plain_text_reply_is_taken_verbatim() {
        let report = parse_reply("  Robots weld car frames.  ");
        assert_eq!(report.cleaned_text, "Robots weld car frames.");
        assert!(report.insights.is_empty());
        assert_eq!(report.relevance_score, NEUTRAL_RELEVANCE);
    }

    #[test]
    fn relevance_is_clamped() {
        assert_eq!(parse_reply(r#"{"cleaned_content": "x", "relevance_score": 4.2}"#).relevance_score, 1.0);
        assert_eq!(parse_reply(r#"{"cleaned_content": "x", "relevance_score": -1}"#).relevance_score, 0.0);
    }

    #[test]
    fn blank_input_skips_backend() {
        let backend = CannedBackend::replying("unused");
        let cleaner = PromptCleaner::new(&backend, &CleanerConfig::default());
        let report = cleaner.clean("T", "   ", Sector::General).unwrap();

        assert!(report.cleaned_text.is_empty());
        assert_eq!(report.relevance_score, 0.0);
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn backend_failure_propagates() {
        let backend = CannedBackend::failing();
        let cleaner = PromptCleaner::new(&backend, &CleanerConfig::default());
        let err = cleaner.clean("T", "Some content here.", Sector::AiMl).unwrap_err();
        assert!(matches!(err, PostforgeError::Cleaner(_)));
    }

    #[test]
    fn prompt_truncates_long_content() {
        let config = CleanerConfig {
            max_prompt_chars: 20,
            ..CleanerConfig::default()
        };
        let cleaner = PromptCleaner::new(PassthroughBackend, &config);
        let prompt = cleaner.build_prompt("Title", &"é".repeat(50), Sector::Manufacturing);

        assert!(prompt.contains(&"é".repeat(20)));
        assert!(!prompt.contains(&"é".repeat(21)));
        assert!(prompt.contains("content truncated"));
        assert!(prompt.contains("industrial automation"));
    }

    struct PassthroughBackend;

    impl CompletionBackend for PassthroughBackend {
        fn complete(&self, request: &CompletionRequest) -> Result<String> {
            Ok(request.prompt.clone())
        }
    }
}
