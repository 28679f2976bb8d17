/// Common test utilities for Engram integration tests
///
/// This file contains shared helpers for all integration tests: building
/// sets and cards in known states and picking a fixed reference time so
/// scheduling assertions are deterministic.

use chrono::{DateTime, TimeZone, Utc};
use engram::models::{Card, FlashcardSet};

/// A fixed reference time so date arithmetic in tests is deterministic
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

/// Creates a set populated with the given number of brand-new cards
///
/// ### Arguments
///
/// * `name` - The name for the set
/// * `count` - How many cards to add
///
/// ### Returns
///
/// A `FlashcardSet` whose cards have never been reviewed (all due)
pub fn build_set(name: &str, count: usize) -> FlashcardSet {
    let mut set = FlashcardSet::new(name.to_string());
    for i in 0..count {
        set.add_card(Card::new(format!("Question {i}"), format!("Answer {i}")));
    }
    set.refresh_counters(fixed_now());
    set
}

/// Collects the IDs of every card in a set, in presentation order
pub fn card_ids(set: &FlashcardSet) -> Vec<String> {
    set.cards().iter().map(|card| card.get_id()).collect()
}
