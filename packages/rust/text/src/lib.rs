//! Text cleanup passes for scraped page content.
//!
//! Raw text goes through normalization, noise removal and the coherence
//! filter ([`prefilter`]); sector-aware filtering happens downstream, and
//! [`dedup_sentences`] finishes the chain.

pub mod coherence;
pub mod dedup;
pub mod noise;
pub mod normalize;
pub mod pos;
pub mod segment;

use tracing::debug;

pub use coherence::{MAX_SENTENCE_CHARS, MIN_SENTENCE_CHARS, filter_coherent, is_coherent};
pub use dedup::{MIN_DEDUP_CHARS, dedup_sentences};
pub use noise::remove_noise;
pub use normalize::{collapse_whitespace, normalize};
pub use pos::PosTag;
pub use segment::{join_sentences, split_sentences, words};

/// Normalize, strip noise, and keep only coherent sentences.
pub fn prefilter(raw: &str) -> String {
    let normalized = normalize(raw);
    let denoised = remove_noise(&normalized);
    let coherent = filter_coherent(&denoised);

    debug!(
        raw_len = raw.len(),
        denoised_len = denoised.len(),
        coherent_len = coherent.len(),
        "prefilter complete"
    );
    coherent
}
