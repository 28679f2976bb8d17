use chrono::{DateTime, Utc};
use proptest::prelude::*;

use crate::models::{Card, ReviewQuality};

/// Generates an arbitrary DateTime<Utc> within 2020-01-01 to 2030-01-01
pub fn arb_datetime_utc() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|ts| DateTime::from_timestamp(ts, 0).unwrap())
}

/// Generates an optional arbitrary DateTime<Utc>
pub fn arb_optional_datetime_utc() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop_oneof![
        Just(None),
        arb_datetime_utc().prop_map(Some),
    ]
}

/// Generates a valid ease factor in [1.3, 4.0]
///
/// Uses integer-then-divide so the exact 1.3 floor is reachable without
/// floating point boundary issues.
pub fn arb_ease_factor() -> impl Strategy<Value = f64> {
    (130u32..=400u32).prop_map(|v| v as f64 / 100.0)
}

/// Generates a review interval in days, including 0 for new cards
pub fn arb_interval() -> impl Strategy<Value = i32> {
    0i32..=400
}

/// Generates a consecutive-success count
pub fn arb_repetitions() -> impl Strategy<Value = i32> {
    0i32..=12
}

/// Generates a lifetime review count
pub fn arb_review_count() -> impl Strategy<Value = i32> {
    0i32..=200
}

/// Generates an arbitrary ReviewQuality
pub fn arb_quality() -> impl Strategy<Value = ReviewQuality> {
    prop_oneof![
        Just(ReviewQuality::Again),
        Just(ReviewQuality::Hard),
        Just(ReviewQuality::Good),
        Just(ReviewQuality::Easy),
    ]
}

/// Generates a successful quality (Good or Easy)
pub fn arb_successful_quality() -> impl Strategy<Value = ReviewQuality> {
    prop_oneof![
        Just(ReviewQuality::Good),
        Just(ReviewQuality::Easy),
    ]
}

/// Generates a lapse quality (Again or Hard)
pub fn arb_lapse_quality() -> impl Strategy<Value = ReviewQuality> {
    prop_oneof![
        Just(ReviewQuality::Again),
        Just(ReviewQuality::Hard),
    ]
}

/// Generates a card with arbitrary scheduling state
pub fn arb_card() -> impl Strategy<Value = Card> {
    (
        arb_ease_factor(),
        arb_interval(),
        arb_repetitions(),
        arb_review_count(),
        arb_optional_datetime_utc(),
        arb_optional_datetime_utc(),
    )
        .prop_map(|(ease_factor, interval, repetitions, review_count, next_review, last_review)| {
            Card::new_with_fields(
                uuid::Uuid::new_v4().to_string(),
                "front".to_string(),
                "back".to_string(),
                None,
                ease_factor,
                interval,
                repetitions,
                review_count,
                next_review,
                last_review,
            )
        })
}

/// Generates a collection of cards with arbitrary scheduling state
pub fn arb_cards() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(arb_card(), 0..12)
}
