use fairway_core::ranking::Tier;
use fairway_rankings::classifier::{classify, classify_strict};

#[test]
fn classifies_v1_vocabulary() {
    assert_eq!(classify("liked"), Tier::Liked);
    assert_eq!(classify("fine"), Tier::Fine);
    assert_eq!(classify("didnt_like"), Tier::DidntLike);
}

#[test]
fn classifies_v2_vocabulary() {
    assert_eq!(classify("would_play_again"), Tier::Liked);
    assert_eq!(classify("it_was_fine"), Tier::Fine);
    assert_eq!(classify("would_not_play_again"), Tier::DidntLike);
}

#[test]
fn normalizes_case_and_whitespace() {
    assert_eq!(classify("  Liked "), Tier::Liked);
    assert_eq!(classify("FINE"), Tier::Fine);
    assert_eq!(classify("Would Play Again"), Tier::Liked);
}

#[test]
fn normalizes_apostrophes_and_separators() {
    assert_eq!(classify("Didn't Like"), Tier::DidntLike);
    assert_eq!(classify("didn't-like"), Tier::DidntLike);
    assert_eq!(classify("would-not-play-again"), Tier::DidntLike);
}

#[test]
fn unknown_label_fails_closed_to_fine() {
    // Reported via the log, never a crash, never silently dropped.
    assert_eq!(classify("meh"), Tier::Fine);
    assert_eq!(classify(""), Tier::Fine);
    assert_eq!(classify("10/10"), Tier::Fine);
}

#[test]
fn strict_classification_distinguishes_unknown() {
    assert_eq!(classify_strict("liked"), Some(Tier::Liked));
    assert_eq!(classify_strict("meh"), None);
    assert_eq!(classify_strict(""), None);
}
