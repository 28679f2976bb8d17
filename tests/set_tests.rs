/// Integration tests for flashcard set bookkeeping
///
/// This file covers the aggregate counters, the "come back in N days"
/// messaging helper, and the identity guarantees around cards with
/// duplicate content.

use chrono::Duration;
use engram::models::Card;
use engram::scheduler;

mod common;
use common::*;

const GOOD: i32 = 2;

/// Tests the counters over a set's life: empty, populated, studied
#[test]
fn test_counters_track_set_lifecycle() {
    let now = fixed_now();
    let mut set = build_set("History", 0);
    assert_eq!(set.get_total_cards(), 0);
    assert_eq!(set.get_cards_due_today(), 0);

    set.add_card(Card::new("q1".to_string(), "a1".to_string()));
    set.add_card(Card::new("q2".to_string(), "a2".to_string()));
    set.refresh_counters(now);
    assert_eq!(set.get_total_cards(), 2);
    assert_eq!(set.get_cards_due_today(), 2);
    assert_eq!(set.get_mastered_cards(), 0);

    let id = card_ids(&set)[0].clone();
    set.record_review(&id, GOOD, now).unwrap();
    assert_eq!(set.get_cards_due_today(), 1);
    assert_eq!(set.get_last_studied(), Some(now));
}

/// Tests the empty-set degenerate case: no session, no error
#[test]
fn test_empty_set_has_nothing_to_study() {
    let set = build_set("Empty", 0);
    let now = fixed_now();

    assert!(set.due_cards(now).is_empty());
    assert_eq!(scheduler::count_due(set.cards(), now), 0);
    assert_eq!(set.next_upcoming_review(now), None);
}

/// Tests the "come back in N days" flow when nothing is due
///
/// After a session the caller asks for the earliest upcoming review to
/// tell the user when to return.
#[test]
fn test_come_back_message_uses_earliest_upcoming_review() {
    let mut set = build_set("History", 2);
    let now = fixed_now();

    // First card reviewed today (due tomorrow), second reviewed and then
    // reviewed again on its next due day (due in six days)
    let ids = card_ids(&set);
    set.record_review(&ids[1], GOOD, now - Duration::days(1)).unwrap();
    set.record_review(&ids[1], GOOD, now).unwrap();
    set.record_review(&ids[0], GOOD, now).unwrap();
    set.refresh_counters(now);

    assert_eq!(set.get_cards_due_today(), 0);
    assert_eq!(set.next_upcoming_review(now), Some(now + Duration::days(1)));
}

/// Tests that cards with identical text stay independently schedulable
///
/// Updates are keyed by the card's UUID, so reviewing one of two
/// identical-looking cards never touches the other.
#[test]
fn test_duplicate_content_cards_are_distinct() {
    let mut set = build_set("Dupes", 0);
    set.add_card(Card::new("same".to_string(), "text".to_string()));
    set.add_card(Card::new("same".to_string(), "text".to_string()));
    let ids = card_ids(&set);
    assert_ne!(ids[0], ids[1]);

    let now = fixed_now();
    set.record_review(&ids[0], GOOD, now).unwrap();

    assert_eq!(set.get_card(&ids[0]).unwrap().get_review_count(), 1);
    assert_eq!(set.get_card(&ids[1]).unwrap().get_review_count(), 0);
}

/// Tests that set serialization survives a round trip with its cards
#[test]
fn test_set_serde_roundtrip() {
    let mut set = build_set("History", 2);
    let now = fixed_now();
    let id = card_ids(&set)[0].clone();
    set.record_review(&id, GOOD, now).unwrap();

    let json = serde_json::to_string(&set).unwrap();
    let restored: engram::models::FlashcardSet = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, set);
}
