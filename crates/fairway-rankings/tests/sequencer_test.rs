use std::sync::Arc;

use fairway_core::models::TierSequences;
use fairway_core::ranking::Tier;
use fairway_rankings::TierSequencer;

#[test]
fn insert_and_read_back() {
    let seq = TierSequencer::new();
    seq.insert("u1", Tier::Liked, "augusta", 0);
    seq.insert("u1", Tier::Liked, "st-andrews", 1);
    assert_eq!(seq.sequence_for("u1", Tier::Liked), ["augusta", "st-andrews"]);
    assert!(seq.sequence_for("u1", Tier::Fine).is_empty());
}

#[test]
fn insert_past_end_clamps_to_append() {
    let seq = TierSequencer::new();
    seq.insert("u1", Tier::Fine, "muni-east", 42);
    seq.insert("u1", Tier::Fine, "muni-west", 42);
    assert_eq!(seq.sequence_for("u1", Tier::Fine), ["muni-east", "muni-west"]);
}

#[test]
fn remove_is_idempotent() {
    let seq = TierSequencer::new();
    seq.insert("u1", Tier::Liked, "augusta", 0);
    assert!(seq.remove("u1", Tier::Liked, "augusta"));
    assert!(!seq.remove("u1", Tier::Liked, "augusta"));
    assert!(seq.sequence_for("u1", Tier::Liked).is_empty());
}

#[test]
fn move_tier_never_leaves_course_in_two_tiers() {
    let seq = TierSequencer::new();
    seq.insert("u1", Tier::Fine, "muni-east", 0);
    assert!(seq.move_tier("u1", "muni-east", Tier::Fine, Tier::Liked, 0));

    let snapshot = seq.snapshot("u1");
    assert_eq!(snapshot.locate("muni-east"), Some((Tier::Liked, 0)));
    assert!(snapshot.sequence(Tier::Fine).is_empty());
}

#[test]
fn move_tier_of_absent_course_inserts_nothing() {
    let seq = TierSequencer::new();
    assert!(!seq.move_tier("u1", "ghost", Tier::Fine, Tier::Liked, 0));
    assert!(seq.snapshot("u1").is_empty());
}

#[test]
fn users_are_isolated() {
    let seq = TierSequencer::new();
    seq.insert("u1", Tier::Liked, "augusta", 0);
    seq.insert("u2", Tier::Liked, "pebble-beach", 0);
    assert_eq!(seq.sequence_for("u1", Tier::Liked), ["augusta"]);
    assert_eq!(seq.sequence_for("u2", Tier::Liked), ["pebble-beach"]);
    assert_eq!(seq.user_count(), 2);
}

// --- Hydration / commit protocol ---

#[test]
fn unseen_user_starts_empty_and_unhydrated() {
    let seq = TierSequencer::new();
    assert!(!seq.is_hydrated("u1"));
    assert!(seq.snapshot("u1").is_empty());
    assert_eq!(seq.version("u1"), 0);
}

#[test]
fn replace_marks_hydrated() {
    let seq = TierSequencer::new();
    let mut state = TierSequences::default();
    state.insert_at(Tier::Liked, "augusta", 0);
    seq.replace("u1", state.clone());
    assert!(seq.is_hydrated("u1"));
    assert_eq!(seq.snapshot("u1"), state);
}

#[test]
fn invalidate_clears_state_and_hydration() {
    let seq = TierSequencer::new();
    seq.insert("u1", Tier::Liked, "augusta", 0);
    seq.replace("u1", seq.snapshot("u1"));
    seq.invalidate("u1");
    assert!(!seq.is_hydrated("u1"));
    assert!(seq.snapshot("u1").is_empty());
}

#[test]
fn mark_committed_bumps_version() {
    let seq = TierSequencer::new();
    assert_eq!(seq.mark_committed("u1"), 1);
    assert_eq!(seq.mark_committed("u1"), 2);
    assert_eq!(seq.version("u1"), 2);
    // Invalidation drops state, not the commit counter.
    seq.invalidate("u1");
    assert_eq!(seq.version("u1"), 2);
}

#[test]
fn concurrent_inserts_across_users_do_not_interfere() {
    let seq = Arc::new(TierSequencer::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let seq = Arc::clone(&seq);
            std::thread::spawn(move || {
                let user = format!("u{i}");
                for j in 0..50 {
                    seq.insert(&user, Tier::Liked, &format!("course-{j}"), j);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    for i in 0..8 {
        assert_eq!(seq.sequence_for(&format!("u{i}"), Tier::Liked).len(), 50);
    }
}
