use fairway_core::ranking::Tier;
use fairway_rankings::{classifier, interpolator, TierSequencer};
use proptest::prelude::*;

fn any_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Liked),
        Just(Tier::Fine),
        Just(Tier::DidntLike),
    ]
}

proptest! {
    // ── Interpolation ─────────────────────────────────────────────────

    #[test]
    fn every_score_stays_inside_its_tier_band(tier in any_tier(), len in 1usize..80) {
        for rank in 0..len {
            let score = interpolator::score(tier, rank, len).unwrap().value();
            prop_assert!(score >= tier.lower() - f64::EPSILON);
            prop_assert!(score <= tier.upper() + f64::EPSILON);
        }
    }

    #[test]
    fn best_rank_gets_the_tier_ceiling(tier in any_tier(), len in 1usize..80) {
        let best = interpolator::score(tier, 0, len).unwrap().value();
        prop_assert_eq!(best, tier.upper());
    }

    #[test]
    fn worst_rank_gets_the_tier_floor(tier in any_tier(), len in 2usize..80) {
        let worst = interpolator::score(tier, len - 1, len).unwrap().value();
        prop_assert!((worst - tier.lower()).abs() < 0.05);
    }

    #[test]
    fn scores_never_increase_with_rank(tier in any_tier(), len in 1usize..80) {
        let mut previous = f64::INFINITY;
        for rank in 0..len {
            let score = interpolator::score(tier, rank, len).unwrap().value();
            prop_assert!(score <= previous, "rank {} scored above rank {}", rank, rank.saturating_sub(1));
            previous = score;
        }
    }

    #[test]
    fn scores_carry_exactly_one_decimal_place(tier in any_tier(), len in 1usize..80, rank_seed in 0usize..80) {
        let rank = rank_seed % len;
        let score = interpolator::score(tier, rank, len).unwrap().value();
        let tenths = score * 10.0;
        prop_assert!((tenths - tenths.round()).abs() < 1e-9);
    }

    // ── Classification ────────────────────────────────────────────────

    #[test]
    fn classify_is_total_over_arbitrary_input(raw in ".*") {
        let tier = classifier::classify(&raw);
        prop_assert!(matches!(tier, Tier::Liked | Tier::Fine | Tier::DidntLike));
    }

    #[test]
    fn strict_and_lenient_classification_agree_on_known_labels(raw in ".*") {
        if let Some(tier) = classifier::classify_strict(&raw) {
            prop_assert_eq!(classifier::classify(&raw), tier);
        }
    }

    // ── Sequencing ────────────────────────────────────────────────────

    #[test]
    fn random_operations_keep_each_course_in_at_most_one_tier(
        ops in prop::collection::vec((0u8..3, 0u8..12, 0usize..16, prop::bool::ANY), 1..60),
    ) {
        let sequencer = TierSequencer::new();
        for (tier_seed, course_seed, position, remove) in ops {
            let tier = Tier::ALL[tier_seed as usize];
            let course = format!("course-{course_seed}");
            if remove {
                sequencer.remove("u1", tier, &course);
            } else if let Some((from, _)) = sequencer.snapshot("u1").locate(&course) {
                sequencer.move_tier("u1", &course, from, tier, position);
            } else {
                sequencer.insert("u1", tier, &course, position);
            }
        }

        let snapshot = sequencer.snapshot("u1");
        let mut seen = std::collections::HashSet::new();
        for tier in Tier::ALL {
            for course in snapshot.sequence(tier) {
                prop_assert!(seen.insert(course.clone()), "{} ranked twice", course);
            }
        }
        prop_assert_eq!(seen.len(), snapshot.total_len());
    }
}
