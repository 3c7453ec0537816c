//! End-to-end scenarios: RankingEngine over a real SQLite StorageEngine.

use std::sync::Arc;

use chrono::Duration;
use fairway_core::config::StorageConfig;
use fairway_core::ranking::Tier;
use fairway_core::traits::{IRankingEngine, IRankingStore, IReviewSource};
use fairway_rankings::{interpolator, RankingEngine};
use fairway_storage::StorageEngine;
use test_fixtures::{base_time, make_review, ReviewBuilder, SAMPLE_COURSES};

fn open_engine() -> (tempfile::TempDir, Arc<StorageEngine>, RankingEngine) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fairway.db");
    let store = Arc::new(StorageEngine::open_at(&db_path, &StorageConfig::default()).unwrap());
    let engine = RankingEngine::new(store.clone(), store.clone());
    (dir, store, engine)
}

#[test]
fn first_review_scores_through_to_sqlite() {
    let (_dir, store, engine) = open_engine();
    store
        .insert_review(&make_review("u1", "augusta-national", "liked", 1))
        .unwrap();

    let score = engine
        .apply_review("u1", "augusta-national", "liked", None)
        .unwrap();
    assert_eq!(score.value(), 10.0);

    assert_eq!(
        store
            .read_score("u1", "augusta-national")
            .unwrap()
            .map(f64::from),
        Some(10.0)
    );
    assert_eq!(
        store.read_sequences("u1").unwrap().liked,
        vec!["augusta-national"]
    );
}

#[test]
fn ranked_insert_lands_between_neighbours() {
    let (_dir, store, engine) = open_engine();
    engine
        .apply_review("u1", "augusta-national", "liked", None)
        .unwrap();
    engine
        .apply_review("u1", "muni-east", "liked", None)
        .unwrap();

    // Better than muni-east, worse than augusta: slot 1.
    let score = engine
        .apply_review("u1", "pebble-beach", "liked", Some(1))
        .unwrap();
    assert_eq!(score.value(), 8.5);

    let sequences = store.read_sequences("u1").unwrap();
    assert_eq!(
        sequences.liked,
        vec!["augusta-national", "pebble-beach", "muni-east"]
    );
    assert_eq!(
        store.read_score("u1", "muni-east").unwrap().map(f64::from),
        Some(7.0)
    );
}

#[test]
fn tier_move_rewrites_both_tiers_in_sqlite() {
    let (_dir, store, engine) = open_engine();
    engine.apply_review("u1", "muni-east", "fine", None).unwrap();
    engine
        .apply_review("u1", "goat-hill", "fine", None)
        .unwrap();

    let score = engine
        .apply_review("u1", "muni-east", "liked", None)
        .unwrap();
    assert_eq!(score.value(), 10.0);

    let sequences = store.read_sequences("u1").unwrap();
    assert_eq!(sequences.liked, vec!["muni-east"]);
    assert_eq!(sequences.fine, vec!["goat-hill"]);
    assert_eq!(
        store.read_score("u1", "goat-hill").unwrap().map(f64::from),
        Some(6.9),
        "remaining fine course is re-interpolated as the sole member"
    );
}

#[test]
fn unknown_sentiment_defaults_to_fine_end_to_end() {
    let (_dir, store, engine) = open_engine();
    let score = engine
        .apply_review("u1", "rancho-vista", "meh!", None)
        .unwrap();
    assert_eq!(score.value(), 6.9);
    assert_eq!(store.read_sequences("u1").unwrap().fine, vec!["rancho-vista"]);
}

#[test]
fn deleting_the_effective_review_falls_back_to_the_survivor() {
    let (_dir, store, engine) = open_engine();

    // Older "fine" round, then a newer "liked" one for the same course.
    store
        .insert_review(&make_review("u1", "torrey-pines", "fine", 60))
        .unwrap();
    let newer = make_review("u1", "torrey-pines", "liked", 2);
    store.insert_review(&newer).unwrap();
    engine
        .apply_review("u1", "torrey-pines", "liked", None)
        .unwrap();

    // The app deletes the newer review, then notifies the engine.
    assert!(store.delete_review(&newer.id).unwrap());
    engine.remove_review("u1", "torrey-pines").unwrap();

    let sequences = store.read_sequences("u1").unwrap();
    assert!(sequences.liked.is_empty());
    assert_eq!(sequences.fine, vec!["torrey-pines"]);
    assert_eq!(
        store
            .read_score("u1", "torrey-pines")
            .unwrap()
            .map(f64::from),
        Some(6.9)
    );
}

#[test]
fn deleting_the_only_review_unranks_the_course() {
    let (_dir, store, engine) = open_engine();
    let review = make_review("u1", "bethpage-black", "liked", 3);
    store.insert_review(&review).unwrap();
    engine
        .apply_review("u1", "bethpage-black", "liked", None)
        .unwrap();

    assert!(store.delete_review(&review.id).unwrap());
    engine.remove_review("u1", "bethpage-black").unwrap();

    assert_eq!(store.read_score("u1", "bethpage-black").unwrap(), None);
    assert!(store.read_sequences("u1").unwrap().is_empty());
}

#[test]
fn cold_start_refresh_scores_every_reviewed_course() {
    let (_dir, store, engine) = open_engine();

    // Only raw reviews exist; no sequences have ever been written.
    store
        .insert_review(&make_review("u1", "augusta-national", "liked", 90))
        .unwrap();
    store
        .insert_review(&make_review("u1", "pebble-beach", "liked", 30))
        .unwrap();
    store
        .insert_review(&make_review("u1", "muni-east", "fine", 10))
        .unwrap();
    store
        .insert_review(&make_review("u1", "goat-hill", "didnt_like", 5))
        .unwrap();

    let scored = engine.refresh_all_rankings("u1").unwrap();
    assert_eq!(scored, 4);

    let sequences = store.read_sequences("u1").unwrap();
    assert_eq!(
        sequences.liked,
        vec!["augusta-national", "pebble-beach"],
        "older rounds rank ahead when no explicit order exists"
    );
    assert_eq!(
        store
            .read_score("u1", "augusta-national")
            .unwrap()
            .map(f64::from),
        Some(10.0)
    );
    assert_eq!(
        store.read_score("u1", "goat-hill").unwrap().map(f64::from),
        Some(2.9)
    );
}

#[test]
fn refresh_respects_a_sentiment_change_in_the_review_log() {
    let (_dir, store, engine) = open_engine();
    store
        .insert_review(&make_review("u1", "muni-east", "liked", 30))
        .unwrap();
    engine.refresh_all_rankings("u1").unwrap();
    assert_eq!(
        store.read_sequences("u1").unwrap().liked,
        vec!["muni-east"]
    );

    // A newer round soured the opinion.
    store
        .insert_review(&make_review("u1", "muni-east", "would_not_play_again", 1))
        .unwrap();
    engine.refresh_all_rankings("u1").unwrap();

    let sequences = store.read_sequences("u1").unwrap();
    assert!(sequences.liked.is_empty());
    assert_eq!(sequences.didnt_like, vec!["muni-east"]);
}

#[test]
fn restart_rehydrates_the_committed_order() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("restart.db");

    {
        let store =
            Arc::new(StorageEngine::open_at(&db_path, &StorageConfig::default()).unwrap());
        let engine = RankingEngine::new(store.clone(), store.clone());
        engine
            .apply_review("u1", "augusta-national", "liked", None)
            .unwrap();
        engine
            .apply_review("u1", "pebble-beach", "liked", None)
            .unwrap();
    }

    // Fresh process: a new engine must pick up where the old one stopped.
    let store = Arc::new(StorageEngine::open_at(&db_path, &StorageConfig::default()).unwrap());
    let engine = RankingEngine::new(store.clone(), store.clone());
    let score = engine
        .apply_review("u1", "muni-east", "liked", Some(0))
        .unwrap();
    assert_eq!(score.value(), 10.0);

    let sequences = store.read_sequences("u1").unwrap();
    assert_eq!(
        sequences.liked,
        vec!["muni-east", "augusta-national", "pebble-beach"]
    );
}

#[test]
fn concurrent_submissions_stay_consistent_over_sqlite() {
    let (_dir, store, engine) = open_engine();
    let engine = Arc::new(engine);

    let handles: Vec<_> = SAMPLE_COURSES
        .iter()
        .take(6)
        .map(|course| {
            let engine = Arc::clone(&engine);
            let course = course.to_string();
            std::thread::spawn(move || {
                engine.apply_review("u1", &course, "liked", None).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let sequences = store.read_sequences("u1").unwrap();
    assert_eq!(sequences.liked.len(), 6, "no submission may be lost");

    // Stored scores must equal the interpolation of the stored order.
    let rescored = interpolator::score_sequence(Tier::Liked, &sequences.liked).unwrap();
    for scored in rescored {
        assert_eq!(
            store
                .read_score("u1", &scored.course_id)
                .unwrap()
                .map(f64::from),
            Some(scored.score.value())
        );
    }
    assert_eq!(engine.sequences("u1"), sequences);
}

#[test]
fn bulk_refresh_covers_every_user() {
    let (_dir, store, engine) = open_engine();
    let users: Vec<String> = (0..5).map(|i| format!("user-{i}")).collect();
    for user in &users {
        store
            .insert_review(&make_review(user, "augusta-national", "liked", 20))
            .unwrap();
        store
            .insert_review(&make_review(user, "goat-hill", "didnt_like", 10))
            .unwrap();
    }

    let total = engine.refresh_users(&users).unwrap();
    assert_eq!(total, 10);
    for user in &users {
        assert_eq!(
            store
                .read_score(user, "augusta-national")
                .unwrap()
                .map(f64::from),
            Some(10.0)
        );
    }
}

#[test]
fn review_builder_round_trips_through_storage() {
    let (_dir, store, _engine) = open_engine();
    let review = ReviewBuilder::new("u1", "st-andrews-old")
        .sentiment("would_play_again")
        .played_at(base_time() - Duration::days(14))
        .notes("windy back nine")
        .build();
    store.insert_review(&review).unwrap();

    let loaded = store.review(&review.id).unwrap().unwrap();
    assert_eq!(loaded.course_id, "st-andrews-old");
    assert_eq!(loaded.sentiment, "would_play_again");
    assert_eq!(loaded.notes.as_deref(), Some("windy back nine"));
    assert_eq!(loaded.played_at, review.played_at);

    let sentiments = store.course_sentiments("u1").unwrap();
    assert_eq!(sentiments.len(), 1);
    assert_eq!(sentiments[0].sentiment, "would_play_again");
}
