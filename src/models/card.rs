use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ReviewQuality;
use crate::scheduler::{DEFAULT_EASE_FACTOR, ReviewUpdate};

/// Represents a flashcard in the spaced repetition system
///
/// A card carries its opaque content (`front`/`back`) together with the
/// scheduling fields the review scheduler reads and writes. All updates are
/// keyed by the card's UUID rather than by content equality, so two cards
/// with identical text remain distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for the card (UUID v4 as string)
    id: String,

    /// The question side of the card; not interpreted by scheduling logic
    front: String,

    /// The answer side of the card; not interpreted by scheduling logic
    back: String,

    /// Optional topic label; not used by scheduling logic
    topic: Option<String>,

    /// How quickly review intervals grow for this card, always >= 1.3
    ease_factor: f64,

    /// Days until the next review
    interval: i32,

    /// Count of consecutive successful reviews; resets to 0 on a lapse
    repetitions: i32,

    /// Total number of times this card has ever been rated; never reset
    review_count: i32,

    /// When this card should next be reviewed; None means always due
    next_review: Option<NaiveDateTime>,

    /// When this card was last reviewed
    last_review: Option<NaiveDateTime>,

    /// Whether this card is considered mastered; recomputed on every rating
    mastered: bool,

    /// The last quality rating applied, kept for display and audit only
    difficulty_rating: Option<ReviewQuality>,
}

impl Card {
    /// Creates a new card with all scheduling fields at their defaults
    ///
    /// ### Arguments
    ///
    /// * `front` - The question side of the card
    /// * `back` - The answer side of the card
    ///
    /// ### Returns
    ///
    /// A new `Card` that has never been reviewed and is always due
    pub fn new(front: String, back: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            front,
            back,
            topic: None,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            review_count: 0,
            next_review: None,
            last_review: None,
            mastered: false,
            difficulty_rating: None,
        }
    }

    /// Creates a new card with all fields specified
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the card
    /// * `front` - The question side of the card
    /// * `back` - The answer side of the card
    /// * `topic` - Optional topic label
    /// * `ease_factor` - How quickly intervals grow
    /// * `interval` - Days until the next review
    /// * `repetitions` - Count of consecutive successful reviews
    /// * `review_count` - Total number of ratings ever applied
    /// * `next_review` - When this card should next be reviewed
    /// * `last_review` - When this card was last reviewed
    ///
    /// ### Returns
    ///
    /// A new `Card` instance with the specified fields; `mastered` and
    /// `difficulty_rating` start unset, as only a rating computes them
    pub fn new_with_fields(
        id: String,
        front: String,
        back: String,
        topic: Option<String>,
        ease_factor: f64,
        interval: i32,
        repetitions: i32,
        review_count: i32,
        next_review: Option<DateTime<Utc>>,
        last_review: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            front,
            back,
            topic,
            ease_factor,
            interval,
            repetitions,
            review_count,
            next_review: next_review.map(|dt| dt.naive_utc()),
            last_review: last_review.map(|dt| dt.naive_utc()),
            mastered: false,
            difficulty_rating: None,
        }
    }

    /// Gets the card's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the card's front text
    pub fn get_front(&self) -> String {
        self.front.clone()
    }

    /// Gets the card's back text
    pub fn get_back(&self) -> String {
        self.back.clone()
    }

    /// Gets the card's topic label
    pub fn get_topic(&self) -> Option<String> {
        self.topic.clone()
    }

    /// Sets the card's topic label
    pub fn set_topic(&mut self, topic: Option<String>) {
        self.topic = topic;
    }

    /// Gets the card's ease factor
    pub fn get_ease_factor(&self) -> f64 {
        self.ease_factor
    }

    /// Gets the card's current review interval in days
    pub fn get_interval(&self) -> i32 {
        self.interval
    }

    /// Gets the card's count of consecutive successful reviews
    pub fn get_repetitions(&self) -> i32 {
        self.repetitions
    }

    /// Gets the total number of times this card has been rated
    pub fn get_review_count(&self) -> i32 {
        self.review_count
    }

    /// Gets the card's next review timestamp as a DateTime<Utc>
    ///
    /// ### Returns
    ///
    /// The timestamp when this card should next be reviewed, or None if the
    /// card has never been scheduled (a new card, always due)
    pub fn get_next_review(&self) -> Option<DateTime<Utc>> {
        self.next_review
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    }

    /// Gets the card's raw next review timestamp
    pub fn get_next_review_raw(&self) -> Option<NaiveDateTime> {
        self.next_review
    }

    /// Gets the card's last review timestamp as a DateTime<Utc>
    ///
    /// ### Returns
    ///
    /// The timestamp when this card was last reviewed, or None if never
    /// reviewed
    pub fn get_last_review(&self) -> Option<DateTime<Utc>> {
        self.last_review
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    }

    /// Gets the card's raw last review timestamp
    pub fn get_last_review_raw(&self) -> Option<NaiveDateTime> {
        self.last_review
    }

    /// Gets whether the card is currently mastered
    pub fn get_mastered(&self) -> bool {
        self.mastered
    }

    /// Gets the last quality rating applied to the card
    pub fn get_difficulty_rating(&self) -> Option<ReviewQuality> {
        self.difficulty_rating
    }

    /// Whether this card is due for review
    ///
    /// A card is due if it has never been scheduled, or if the date portion
    /// of its next review is on or before the date portion of `as_of`.
    /// Comparison is by UTC calendar date, so a card scheduled for any time
    /// today is due all day today.
    ///
    /// ### Arguments
    ///
    /// * `as_of` - The reference time to compare against
    pub fn is_due(&self, as_of: DateTime<Utc>) -> bool {
        match self.next_review {
            None => true,
            Some(next) => next.date() <= as_of.date_naive(),
        }
    }

    /// Merges a computed review update into this card
    ///
    /// This is the caller-side merge step: the scheduler computes a
    /// `ReviewUpdate` from a read-only snapshot, and this method writes the
    /// new values back onto the stored card.
    ///
    /// ### Arguments
    ///
    /// * `update` - The update produced by `scheduler::rate_card`
    pub fn apply_update(&mut self, update: &ReviewUpdate) {
        self.ease_factor = update.ease_factor;
        self.interval = update.interval;
        self.repetitions = update.repetitions;
        self.review_count = update.review_count;
        self.next_review = Some(update.next_review.naive_utc());
        self.last_review = Some(update.last_review.naive_utc());
        self.mastered = update.mastered;
        self.difficulty_rating = Some(update.difficulty_rating);
    }
}
