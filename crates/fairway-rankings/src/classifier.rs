//! Sentiment classification — raw review labels to tiers.
//!
//! Reviews store the sentiment string exactly as submitted, so the engine
//! has to understand every vocabulary the review flow has ever shipped.

use fairway_core::ranking::Tier;

/// Alias table across sentiment vocabulary versions. v1 used the tier
/// names directly; v2 renamed the review buttons without migrating old
/// rows.
const SENTIMENT_ALIASES: &[(&str, Tier)] = &[
    // v1
    ("liked", Tier::Liked),
    ("fine", Tier::Fine),
    ("didnt_like", Tier::DidntLike),
    // v2
    ("would_play_again", Tier::Liked),
    ("it_was_fine", Tier::Fine),
    ("would_not_play_again", Tier::DidntLike),
];

/// Normalize a raw label: trim, lowercase, drop apostrophes, unify
/// space/hyphen separators to underscores.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace('\'', "")
        .replace([' ', '-'], "_")
}

/// Strict classification: `None` for anything outside the alias table.
pub fn classify_strict(raw: &str) -> Option<Tier> {
    let normalized = normalize(raw);
    SENTIMENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, tier)| *tier)
}

/// Classify a raw sentiment label, failing closed to `Fine`.
///
/// An unknown label is an upstream data bug, not a reason to fail a
/// review submission: it is logged and treated as the neutral tier.
pub fn classify(raw: &str) -> Tier {
    classify_strict(raw).unwrap_or_else(|| {
        tracing::warn!(sentiment = %raw, "unknown sentiment label, defaulting to fine");
        Tier::Fine
    })
}
