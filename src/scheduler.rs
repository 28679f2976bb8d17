//! The review scheduler: a set of pure functions that decide which cards
//! are due, compute the next scheduling state after a rating, and derive
//! the aggregate numbers callers display. The interval and ease-factor
//! update rules are a simplified variant of the SM-2 algorithm used by
//! Anki and similar spaced repetition software.
//!
//! Every function here takes caller-owned snapshots and returns new
//! values: no I/O, no shared state, no retained references.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::{Card, ReviewQuality};

/// Hard floor for the ease factor; no number of lapses can push it lower
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to cards that have never been reviewed
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Interval in days after the first successful review
pub const FIRST_INTERVAL_DAYS: i32 = 1;

/// Interval in days after the second consecutive successful review
pub const SECOND_INTERVAL_DAYS: i32 = 6;

/// Interval in days a card is forced back to after a lapse
pub const LAPSE_INTERVAL_DAYS: i32 = 1;

/// Minimum consecutive successful reviews for a card to count as mastered
pub const MASTERY_MIN_REPETITIONS: i32 = 3;

/// Minimum interval in days for a card to count as mastered
pub const MASTERY_MIN_INTERVAL_DAYS: i32 = 21;

/// The new scheduling state computed for a card by a single rating
///
/// The scheduler never mutates the card it was shown; the caller merges
/// this update into its stored copy (via `Card::apply_update`) and persists
/// the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    /// The card's new ease factor, clamped to `MIN_EASE_FACTOR`
    pub ease_factor: f64,

    /// The card's new interval in days
    pub interval: i32,

    /// The card's new consecutive-success count
    pub repetitions: i32,

    /// The card's new lifetime rating count
    pub review_count: i32,

    /// When the card should next be reviewed
    pub next_review: DateTime<Utc>,

    /// When this rating happened
    pub last_review: DateTime<Utc>,

    /// Whether the card now counts as mastered
    pub mastered: bool,

    /// The quality rating that produced this update
    pub difficulty_rating: ReviewQuality,
}

/// Computes the next scheduling state for a card after a rating
///
/// This is the core of the scheduler. Lapses (`Again`/`Hard`) reset the
/// repetition streak and force the card back to a one-day interval without
/// touching the ease factor. Successful reviews (`Good`/`Easy`) adjust the
/// ease factor, then grow the interval along the 1-day, 6-day,
/// interval-times-ease ramp.
///
/// The function is total over all valid inputs and has no side effects;
/// invalid ratings are unrepresentable because `ReviewQuality` is already
/// validated at construction.
///
/// ### Arguments
///
/// * `card` - A read-only snapshot of the card being reviewed
/// * `quality` - The rating the user gave
/// * `now` - The reference time of the rating
///
/// ### Returns
///
/// A `ReviewUpdate` holding the new values for every scheduling field
#[instrument(skip(card), fields(card_id = %card.get_id()))]
pub fn rate_card(card: &Card, quality: ReviewQuality, now: DateTime<Utc>) -> ReviewUpdate {
    let mut ease_factor = card.get_ease_factor();
    let mut interval = card.get_interval();
    let mut repetitions = card.get_repetitions();

    if quality.is_successful() {
        // EF' = max(1.3, EF + (0.1 - (3-q) * (0.08 + (3-q) * 0.02)))
        // Good (q=2) nets +0.0, Easy (q=3) nets +0.1.
        let q = quality.ordinal() as f64;
        ease_factor =
            (ease_factor + (0.1 - (3.0 - q) * (0.08 + (3.0 - q) * 0.02))).max(MIN_EASE_FACTOR);

        interval = match repetitions {
            0 => FIRST_INTERVAL_DAYS,
            1 => SECOND_INTERVAL_DAYS,
            _ => (interval as f64 * ease_factor).round() as i32,
        };
        repetitions += 1;
    } else {
        // Lapse: reset the streak, keep the ease factor where it was
        repetitions = 0;
        interval = LAPSE_INTERVAL_DAYS;
    }

    let update = ReviewUpdate {
        ease_factor,
        interval,
        repetitions,
        review_count: card.get_review_count() + 1,
        next_review: now + Duration::days(interval as i64),
        last_review: now,
        mastered: repetitions >= MASTERY_MIN_REPETITIONS
            && interval >= MASTERY_MIN_INTERVAL_DAYS,
        difficulty_rating: quality,
    };

    debug!(
        interval = update.interval,
        repetitions = update.repetitions,
        mastered = update.mastered,
        "Computed review update"
    );

    update
}

/// Selects the cards due for review
///
/// A card is due if it has never been scheduled or if its next review date
/// (UTC calendar date) is on or before `as_of`. The returned cards keep
/// their original relative order.
///
/// If nothing is due but the collection is non-empty, the full collection
/// is returned instead so a study session is never empty while cards
/// exist. An empty input yields an empty result.
///
/// ### Arguments
///
/// * `cards` - The full card collection for a set
/// * `as_of` - The reference time for the due comparison
///
/// ### Returns
///
/// References to the due cards, or to every card if none are due
#[instrument(skip(cards), fields(card_count = cards.len()))]
pub fn select_due_cards<'a>(cards: &'a [Card], as_of: DateTime<Utc>) -> Vec<&'a Card> {
    let due: Vec<&Card> = cards.iter().filter(|card| card.is_due(as_of)).collect();

    if due.is_empty() && !cards.is_empty() {
        debug!("No cards due, falling back to the full collection");
        return cards.iter().collect();
    }

    debug!(due_count = due.len(), "Selected due cards");
    due
}

/// Counts the cards due for review
///
/// Unlike `select_due_cards` this applies no fallback: when nothing is due
/// the count is zero.
pub fn count_due(cards: &[Card], as_of: DateTime<Utc>) -> usize {
    cards.iter().filter(|card| card.is_due(as_of)).count()
}

/// Counts the cards currently flagged as mastered
pub fn count_mastered(cards: &[Card]) -> usize {
    cards.iter().filter(|card| card.get_mastered()).count()
}

/// Finds the earliest upcoming review time strictly after `as_of`
///
/// Used to tell the user "come back in N days" when nothing is currently
/// due. Cards that have never been scheduled are ignored.
///
/// ### Returns
///
/// The earliest future next-review timestamp, or None if no card has one
pub fn next_upcoming_review(cards: &[Card], as_of: DateTime<Utc>) -> Option<DateTime<Utc>> {
    cards
        .iter()
        .filter_map(|card| card.get_next_review())
        .filter(|next| *next > as_of)
        .min()
}

/// Projects the interval each quality rating would produce for a card
///
/// This simulates `rate_card` for all four qualities without committing
/// anything, so a UI can show "1 day" / "6 days" style estimates on the
/// rating buttons before the user answers.
///
/// ### Arguments
///
/// * `card` - The card about to be rated
/// * `now` - The reference time of the prospective rating
///
/// ### Returns
///
/// The four qualities in ordinal order, each paired with the interval in
/// days that rating would schedule
pub fn preview_intervals(card: &Card, now: DateTime<Utc>) -> [(ReviewQuality, i32); 4] {
    ReviewQuality::ALL.map(|quality| (quality, rate_card(card, quality, now).interval))
}
