use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::SchedulerError;
use crate::models::{Card, ReviewQuality};
use crate::scheduler::{self, ReviewUpdate};

/// An ordered collection of cards plus its aggregate counters
///
/// The scheduler computes per-card updates; this type owns the follow-up
/// bookkeeping: merging an update into the stored card by ID, stamping
/// `last_studied`, and recomputing the aggregate counters by rescanning the
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    /// Unique identifier for the set (UUID v4 as string)
    id: String,

    /// Human-readable name of the set
    name: String,

    /// The cards in the set, in presentation order
    cards: Vec<Card>,

    /// Number of cards in the set
    total_cards: usize,

    /// Number of cards currently flagged as mastered
    mastered_cards: usize,

    /// Number of cards due as of the last counter refresh
    cards_due_today: usize,

    /// When a card in this set was last rated
    last_studied: Option<NaiveDateTime>,
}

impl FlashcardSet {
    /// Creates a new, empty flashcard set
    ///
    /// ### Arguments
    ///
    /// * `name` - Human-readable name of the set
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            cards: Vec::new(),
            total_cards: 0,
            mastered_cards: 0,
            cards_due_today: 0,
            last_studied: None,
        }
    }

    /// Gets the set's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the set's name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Sets the set's name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Gets the cards in the set, in presentation order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Gets the number of cards in the set
    pub fn get_total_cards(&self) -> usize {
        self.total_cards
    }

    /// Gets the number of cards flagged as mastered
    pub fn get_mastered_cards(&self) -> usize {
        self.mastered_cards
    }

    /// Gets the number of cards due as of the last counter refresh
    pub fn get_cards_due_today(&self) -> usize {
        self.cards_due_today
    }

    /// Gets when a card in this set was last rated, as a DateTime<Utc>
    pub fn get_last_studied(&self) -> Option<DateTime<Utc>> {
        self.last_studied
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    }

    /// Gets the raw last-studied timestamp
    pub fn get_last_studied_raw(&self) -> Option<NaiveDateTime> {
        self.last_studied
    }

    /// Adds a card to the end of the set
    ///
    /// Updates the counters that need no reference date (`total_cards`,
    /// `mastered_cards`). `cards_due_today` is only recomputed by
    /// `refresh_counters` or `record_review`, which know what "today" is.
    ///
    /// ### Arguments
    ///
    /// * `card` - The card to add
    pub fn add_card(&mut self, card: Card) {
        debug!(set_id = %self.id, card_id = %card.get_id(), "Adding card to set");
        self.cards.push(card);
        self.total_cards = self.cards.len();
        self.mastered_cards = scheduler::count_mastered(&self.cards);
    }

    /// Retrieves a card by its ID
    ///
    /// ### Returns
    ///
    /// The card if present, or None if no card in the set has that ID
    pub fn get_card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.get_id() == card_id)
    }

    /// Selects the cards due for review in this set
    ///
    /// Delegates to `scheduler::select_due_cards`, including its fallback
    /// to the full collection when nothing is due.
    ///
    /// ### Arguments
    ///
    /// * `as_of` - The reference time for the due comparison
    pub fn due_cards(&self, as_of: DateTime<Utc>) -> Vec<&Card> {
        scheduler::select_due_cards(&self.cards, as_of)
    }

    /// Finds the earliest upcoming review time in this set
    ///
    /// ### Arguments
    ///
    /// * `as_of` - Only review times strictly after this count
    pub fn next_upcoming_review(&self, as_of: DateTime<Utc>) -> Option<DateTime<Utc>> {
        scheduler::next_upcoming_review(&self.cards, as_of)
    }

    /// Records a review for a card in this set
    ///
    /// This function validates the raw rating, computes the card's new
    /// scheduling state, merges it into the stored card, stamps the set's
    /// `last_studied`, and recomputes the aggregate counters.
    ///
    /// ### Arguments
    ///
    /// * `card_id` - The ID of the card being reviewed
    /// * `rating` - The raw rating given during the review (0-3)
    /// * `now` - The reference time of the rating
    ///
    /// ### Returns
    ///
    /// A Result containing the applied `ReviewUpdate` if successful
    ///
    /// ### Errors
    ///
    /// Returns an error if:
    /// - The rating is outside 0-3 (`InvalidRating`)
    /// - No card in the set has the given ID (`CardNotFound`)
    #[instrument(skip(self), fields(set_id = %self.id))]
    pub fn record_review(
        &mut self,
        card_id: &str,
        rating: i32,
        now: DateTime<Utc>,
    ) -> Result<ReviewUpdate, SchedulerError> {
        // Validate the rating before any scheduling arithmetic runs
        let quality = ReviewQuality::try_from(rating)?;

        let card = self
            .cards
            .iter_mut()
            .find(|card| card.get_id() == card_id)
            .ok_or_else(|| SchedulerError::CardNotFound(card_id.to_string()))?;

        let update = scheduler::rate_card(card, quality, now);
        card.apply_update(&update);

        self.last_studied = Some(now.naive_utc());
        self.refresh_counters(now);

        info!(
            interval = update.interval,
            mastered = update.mastered,
            "Recorded review"
        );

        Ok(update)
    }

    /// Recomputes the aggregate counters from the card list
    ///
    /// ### Arguments
    ///
    /// * `as_of` - The reference time used for the due count
    pub fn refresh_counters(&mut self, as_of: DateTime<Utc>) {
        self.total_cards = self.cards.len();
        self.mastered_cards = scheduler::count_mastered(&self.cards);
        self.cards_due_today = scheduler::count_due(&self.cards, as_of);
    }
}
