//! Property-based tests for the photo ranking.
//!
//! These tests verify that:
//! - Every photo that passes the category filter is ranked exactly once
//! - The ranking is sorted by average, best first, and stable on ties
//! - Averages stay finite and within the score range
//! - The order in which ratings were submitted does not change any average

use std::collections::HashMap;

use proptest::prelude::*;
use storage::models::{CriterionScores, MAX_SCORE, Photo, Rating, Score};
use storage::services::ranking::{CategoryFilter, compute_ranking, overall_average};
use uuid::Uuid;

const CATEGORIES: [Uuid; 3] = [
    Uuid::from_u128(0x1111),
    Uuid::from_u128(0x2222),
    Uuid::from_u128(0x3333),
];

/// Strategy for one evaluator's scores over a handful of criteria.
fn arb_scores() -> impl Strategy<Value = CriterionScores> {
    prop::collection::btree_map(
        prop::sample::select(vec!["composition", "creativity", "technique", "theme"]),
        0..=MAX_SCORE,
        0..4,
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|(criterion, value)| (criterion, Score::new(value)))
            .collect()
    })
}

/// Strategy for a photo in one of the fixed categories with up to five ratings.
fn arb_photo() -> impl Strategy<Value = Photo> {
    (
        prop::sample::select(CATEGORIES.to_vec()),
        prop::collection::vec(arb_scores(), 0..5),
    )
        .prop_map(|(category_id, all_scores)| {
            let photo_id = Uuid::new_v4();
            Photo {
                photo_id,
                contest_id: Uuid::nil(),
                category_id,
                author_name: None,
                url: format!("https://example.org/{}.jpg", photo_id),
                drive_file_id: None,
                created_at: chrono::Utc::now().naive_utc(),
                ratings: all_scores
                    .into_iter()
                    .enumerate()
                    .map(|(idx, scores)| {
                        Rating::new(photo_id, format!("evaluator-{}", idx), scores, None)
                    })
                    .collect(),
            }
        })
}

/// A photo along with the same ratings in a random order.
fn arb_photo_with_shuffled_ratings() -> impl Strategy<Value = (Photo, Vec<Rating>)> {
    arb_photo().prop_flat_map(|photo| {
        let ratings = photo.ratings.clone();
        (Just(photo), Just(ratings).prop_shuffle())
    })
}

fn arb_filter() -> impl Strategy<Value = CategoryFilter> {
    prop_oneof![
        Just(CategoryFilter::All),
        prop::sample::select(CATEGORIES.to_vec()).prop_map(CategoryFilter::Category),
        Just(CategoryFilter::Category(Uuid::from_u128(0x9999))),
    ]
}

proptest! {
    /// Output holds exactly the photos that match the filter.
    #[test]
    fn ranks_every_matching_photo_once(
        photos in prop::collection::vec(arb_photo(), 0..20),
        filter in arb_filter(),
    ) {
        let expected = photos.iter().filter(|p| filter.matches(p.category_id)).count();

        let ranked = compute_ranking(photos.clone(), filter);

        prop_assert_eq!(ranked.len(), expected);
        if filter == CategoryFilter::All {
            prop_assert_eq!(ranked.len(), photos.len());
        }
        for entry in &ranked {
            prop_assert!(filter.matches(entry.photo.category_id));
        }

        let mut seen: Vec<Uuid> = ranked.iter().map(|r| r.photo.photo_id).collect();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), expected);
    }

    /// Averages never increase down the ranking and ties keep input order.
    #[test]
    fn ranking_is_sorted_and_stable(
        photos in prop::collection::vec(arb_photo(), 0..20),
        filter in arb_filter(),
    ) {
        let input_index: HashMap<Uuid, usize> = photos
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.photo_id, idx))
            .collect();

        let ranked = compute_ranking(photos, filter);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].average >= pair[1].average);
            if pair[0].average == pair[1].average {
                prop_assert!(
                    input_index[&pair[0].photo.photo_id] < input_index[&pair[1].photo.photo_id]
                );
            }
        }
    }

    /// Averages are finite, within [0, MAX_SCORE], and count every rating.
    #[test]
    fn averages_stay_in_range(photos in prop::collection::vec(arb_photo(), 0..20)) {
        let rating_counts: HashMap<Uuid, usize> =
            photos.iter().map(|p| (p.photo_id, p.ratings.len())).collect();

        for entry in compute_ranking(photos, CategoryFilter::All) {
            prop_assert!(entry.average.is_finite());
            prop_assert!(entry.average >= 0.0);
            prop_assert!(entry.average <= f64::from(MAX_SCORE));
            prop_assert_eq!(entry.num_evaluations, rating_counts[&entry.photo.photo_id]);
            if entry.num_evaluations == 0 {
                prop_assert_eq!(entry.average, 0.0);
            }
        }
    }

    /// Reordering a photo's ratings leaves its average unchanged, to the bit.
    #[test]
    fn rating_order_does_not_matter((photo, shuffled) in arb_photo_with_shuffled_ratings()) {
        let mut reversed = photo.ratings.clone();
        reversed.reverse();

        let forward = overall_average(&photo.ratings);

        prop_assert_eq!(forward.to_bits(), overall_average(&reversed).to_bits());
        prop_assert_eq!(forward.to_bits(), overall_average(&shuffled).to_bits());
    }

    /// Two photos holding the same ratings in different orders tie, and the
    /// tie keeps their input order.
    #[test]
    fn same_ratings_in_any_order_tie_in_input_order(
        (photo, shuffled) in arb_photo_with_shuffled_ratings(),
    ) {
        let mut twin = photo.clone();
        twin.photo_id = Uuid::new_v4();
        twin.ratings = shuffled;
        let expected = vec![photo.photo_id, twin.photo_id];

        let ranked = compute_ranking(vec![photo, twin], CategoryFilter::All);

        prop_assert_eq!(ranked[0].average, ranked[1].average);
        let order: Vec<Uuid> = ranked.iter().map(|r| r.photo.photo_id).collect();
        prop_assert_eq!(order, expected);
    }

    /// Ranking the same input twice gives the same order.
    #[test]
    fn ranking_is_deterministic(
        photos in prop::collection::vec(arb_photo(), 0..20),
        filter in arb_filter(),
    ) {
        let first: Vec<Uuid> = compute_ranking(photos.clone(), filter)
            .into_iter()
            .map(|r| r.photo.photo_id)
            .collect();
        let second: Vec<Uuid> = compute_ranking(photos, filter)
            .into_iter()
            .map(|r| r.photo.photo_id)
            .collect();

        prop_assert_eq!(first, second);
    }
}
