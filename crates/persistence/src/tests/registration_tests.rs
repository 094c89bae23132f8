// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration admission and cancellation tests.
//!
//! Covers the capacity accountant end to end: admission ordering,
//! waitlist overflow, FIFO promotion on cancellation, idempotent
//! double-cancel, and the seat-reuse race sequence.

use eventhub_domain::RegistrationStatus;

use super::{create_published_event, create_test_persistence, create_test_user};
use crate::{CancellationOutcome, PersistenceError, Persistence, RegistrationData};

#[test]
fn test_admissions_fill_capacity_then_waitlist() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 2);

    let alice: i64 = create_test_user(&mut persistence, "alice");
    let bob: i64 = create_test_user(&mut persistence, "bob");
    let carol: i64 = create_test_user(&mut persistence, "carol");

    let first: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("First registration should succeed");
    let second: RegistrationData = persistence
        .create_registration(bob, event_id, 1)
        .expect("Second registration should succeed");
    let third: RegistrationData = persistence
        .create_registration(carol, event_id, 1)
        .expect("Third registration should succeed");

    assert_eq!(first.status, RegistrationStatus::Confirmed);
    assert_eq!(second.status, RegistrationStatus::Confirmed);
    assert_eq!(third.status, RegistrationStatus::Waitlist);
}

#[test]
fn test_zero_capacity_admits_everyone() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 0);

    for name in ["u1", "u2", "u3", "u4", "u5"] {
        let user_id: i64 = create_test_user(&mut persistence, name);
        let registration: RegistrationData = persistence
            .create_registration(user_id, event_id, 1)
            .expect("Registration on unlimited event should succeed");
        assert_eq!(registration.status, RegistrationStatus::Confirmed);
    }

    let waitlisted: i64 = persistence
        .count_registrations(event_id, RegistrationStatus::Waitlist)
        .expect("Count should succeed");
    assert_eq!(waitlisted, 0);
}

#[test]
fn test_duplicate_active_registration_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 10);
    let alice: i64 = create_test_user(&mut persistence, "alice");

    persistence
        .create_registration(alice, event_id, 1)
        .expect("First registration should succeed");

    let result = persistence.create_registration(alice, event_id, 1);

    match result {
        Err(PersistenceError::DuplicateRegistration { user_id, event_id: e }) => {
            assert_eq!(user_id, alice);
            assert_eq!(e, event_id);
        }
        other => panic!("Expected DuplicateRegistration, got {other:?}"),
    }
}

#[test]
fn test_waitlisted_registration_also_blocks_duplicates() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 1);

    let alice: i64 = create_test_user(&mut persistence, "alice");
    let bob: i64 = create_test_user(&mut persistence, "bob");

    persistence
        .create_registration(alice, event_id, 1)
        .expect("First registration should succeed");
    let waitlisted: RegistrationData = persistence
        .create_registration(bob, event_id, 1)
        .expect("Second registration should succeed");
    assert_eq!(waitlisted.status, RegistrationStatus::Waitlist);

    let result = persistence.create_registration(bob, event_id, 1);
    assert!(matches!(
        result,
        Err(PersistenceError::DuplicateRegistration { .. })
    ));
}

#[test]
fn test_cancelled_registration_allows_re_registration() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 5);
    let alice: i64 = create_test_user(&mut persistence, "alice");

    let first: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("First registration should succeed");
    persistence
        .cancel_registration(first.registration_id)
        .expect("Cancellation should succeed");

    let second: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("Re-registration after cancel should succeed");
    assert_eq!(second.status, RegistrationStatus::Confirmed);
    assert_ne!(second.registration_id, first.registration_id);
}

#[test]
fn test_registration_for_nonexistent_event_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let alice: i64 = create_test_user(&mut persistence, "alice");

    let result = persistence.create_registration(alice, 99999, 1);

    assert!(matches!(result, Err(PersistenceError::EventNotFound(99999))));
}

#[test]
fn test_registration_on_draft_event_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = persistence
        .create_event(&super::create_test_event_spec(owner, 10))
        .expect("Event creation should succeed");
    let alice: i64 = create_test_user(&mut persistence, "alice");

    let result = persistence.create_registration(alice, event_id, 1);

    match result {
        Err(PersistenceError::EventNotOpen { event_id: e, lifecycle }) => {
            assert_eq!(e, event_id);
            assert_eq!(lifecycle, "DRAFT");
        }
        other => panic!("Expected EventNotOpen, got {other:?}"),
    }
}

#[test]
fn test_registration_on_closed_event_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 10);
    persistence
        .transition_event_lifecycle(event_id, eventhub_domain::EventLifecycle::Closed)
        .expect("Close should succeed");
    let alice: i64 = create_test_user(&mut persistence, "alice");

    let result = persistence.create_registration(alice, event_id, 1);
    assert!(matches!(result, Err(PersistenceError::EventNotOpen { .. })));
}

#[test]
fn test_cancel_promotes_oldest_waitlisted() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 1);

    let alice: i64 = create_test_user(&mut persistence, "alice");
    let bob: i64 = create_test_user(&mut persistence, "bob");
    let carol: i64 = create_test_user(&mut persistence, "carol");

    let confirmed: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("Registration should succeed");
    let first_waitlisted: RegistrationData = persistence
        .create_registration(bob, event_id, 1)
        .expect("Registration should succeed");
    let second_waitlisted: RegistrationData = persistence
        .create_registration(carol, event_id, 1)
        .expect("Registration should succeed");
    assert_eq!(first_waitlisted.status, RegistrationStatus::Waitlist);
    assert_eq!(second_waitlisted.status, RegistrationStatus::Waitlist);

    let outcome: CancellationOutcome = persistence
        .cancel_registration(confirmed.registration_id)
        .expect("Cancellation should succeed");

    assert!(!outcome.already_cancelled);
    assert_eq!(outcome.registration.status, RegistrationStatus::Cancelled);

    let promoted: RegistrationData = outcome.promoted.expect("A promotion should have happened");
    assert_eq!(promoted.registration_id, first_waitlisted.registration_id);
    assert_eq!(promoted.status, RegistrationStatus::Confirmed);

    // Only one promotion per cancel: carol stays waitlisted.
    let carol_row: RegistrationData = persistence
        .get_registration(second_waitlisted.registration_id)
        .expect("Lookup should succeed")
        .expect("Registration should exist");
    assert_eq!(carol_row.status, RegistrationStatus::Waitlist);
}

#[test]
fn test_cancel_with_empty_waitlist_promotes_nobody() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 5);
    let alice: i64 = create_test_user(&mut persistence, "alice");

    let registration: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("Registration should succeed");

    let outcome: CancellationOutcome = persistence
        .cancel_registration(registration.registration_id)
        .expect("Cancellation should succeed");

    assert!(outcome.promoted.is_none());
    assert!(!outcome.already_cancelled);
}

#[test]
fn test_double_cancel_is_idempotent_and_promotes_once() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 1);

    let alice: i64 = create_test_user(&mut persistence, "alice");
    let bob: i64 = create_test_user(&mut persistence, "bob");
    let carol: i64 = create_test_user(&mut persistence, "carol");

    let confirmed: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("Registration should succeed");
    persistence
        .create_registration(bob, event_id, 1)
        .expect("Registration should succeed");
    let carol_registration: RegistrationData = persistence
        .create_registration(carol, event_id, 1)
        .expect("Registration should succeed");

    let first_outcome: CancellationOutcome = persistence
        .cancel_registration(confirmed.registration_id)
        .expect("First cancellation should succeed");
    assert!(first_outcome.promoted.is_some());

    // Second cancel of the same registration: no-op, no second promotion.
    let second_outcome: CancellationOutcome = persistence
        .cancel_registration(confirmed.registration_id)
        .expect("Second cancellation should succeed");
    assert!(second_outcome.already_cancelled);
    assert!(second_outcome.promoted.is_none());

    let carol_row: RegistrationData = persistence
        .get_registration(carol_registration.registration_id)
        .expect("Lookup should succeed")
        .expect("Registration should exist");
    assert_eq!(carol_row.status, RegistrationStatus::Waitlist);
}

#[test]
fn test_cancel_nonexistent_registration_fails() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.cancel_registration(424_242);

    assert!(matches!(
        result,
        Err(PersistenceError::RegistrationNotFound(424_242))
    ));
}

#[test]
fn test_seat_freed_by_cancel_goes_to_waitlist_head_not_next_arrival() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 1);

    let alice: i64 = create_test_user(&mut persistence, "alice");
    let bob: i64 = create_test_user(&mut persistence, "bob");
    let dave: i64 = create_test_user(&mut persistence, "dave");

    let alice_registration: RegistrationData = persistence
        .create_registration(alice, event_id, 1)
        .expect("Registration should succeed");
    let bob_registration: RegistrationData = persistence
        .create_registration(bob, event_id, 1)
        .expect("Registration should succeed");
    assert_eq!(bob_registration.status, RegistrationStatus::Waitlist);

    let outcome: CancellationOutcome = persistence
        .cancel_registration(alice_registration.registration_id)
        .expect("Cancellation should succeed");
    assert_eq!(
        outcome.promoted.expect("Bob should be promoted").registration_id,
        bob_registration.registration_id
    );

    // Bob now holds the only seat; a later arrival waitlists.
    let dave_registration: RegistrationData = persistence
        .create_registration(dave, event_id, 1)
        .expect("Registration should succeed");
    assert_eq!(dave_registration.status, RegistrationStatus::Waitlist);
}

#[test]
fn test_confirmed_count_reflects_promotions_and_cancels() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 2);

    let users: Vec<i64> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| create_test_user(&mut persistence, name))
        .collect();

    let mut registrations: Vec<RegistrationData> = Vec::new();
    for user_id in &users {
        registrations.push(
            persistence
                .create_registration(*user_id, event_id, 1)
                .expect("Registration should succeed"),
        );
    }

    let confirmed: i64 = persistence
        .count_registrations(event_id, RegistrationStatus::Confirmed)
        .expect("Count should succeed");
    let waitlisted: i64 = persistence
        .count_registrations(event_id, RegistrationStatus::Waitlist)
        .expect("Count should succeed");
    assert_eq!(confirmed, 2);
    assert_eq!(waitlisted, 2);

    persistence
        .cancel_registration(registrations[0].registration_id)
        .expect("Cancellation should succeed");

    // One seat freed, one promotion: counts rebalance.
    let confirmed_after: i64 = persistence
        .count_registrations(event_id, RegistrationStatus::Confirmed)
        .expect("Count should succeed");
    let waitlisted_after: i64 = persistence
        .count_registrations(event_id, RegistrationStatus::Waitlist)
        .expect("Count should succeed");
    let cancelled_after: i64 = persistence
        .count_registrations(event_id, RegistrationStatus::Cancelled)
        .expect("Count should succeed");
    assert_eq!(confirmed_after, 2);
    assert_eq!(waitlisted_after, 1);
    assert_eq!(cancelled_after, 1);
}

#[test]
fn test_list_registrations_for_user_and_event() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let first_event: i64 = create_published_event(&mut persistence, owner, 5);
    let second_event: i64 = create_published_event(&mut persistence, owner, 5);
    let alice: i64 = create_test_user(&mut persistence, "alice");
    let bob: i64 = create_test_user(&mut persistence, "bob");

    persistence
        .create_registration(alice, first_event, 1)
        .expect("Registration should succeed");
    persistence
        .create_registration(alice, second_event, 2)
        .expect("Registration should succeed");
    persistence
        .create_registration(bob, first_event, 1)
        .expect("Registration should succeed");

    let alice_rows: Vec<RegistrationData> = persistence
        .list_registrations_for_user(alice)
        .expect("List should succeed");
    assert_eq!(alice_rows.len(), 2);
    assert!(alice_rows.iter().all(|r| r.user_id == alice));

    let event_rows: Vec<RegistrationData> = persistence
        .list_registrations_for_event(first_event)
        .expect("List should succeed");
    assert_eq!(event_rows.len(), 2);
    assert!(event_rows.iter().all(|r| r.event_id == first_event));
}

#[test]
fn test_registration_quantity_is_persisted() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = create_published_event(&mut persistence, owner, 10);
    let alice: i64 = create_test_user(&mut persistence, "alice");

    let registration: RegistrationData = persistence
        .create_registration(alice, event_id, 4)
        .expect("Registration should succeed");

    let fetched: RegistrationData = persistence
        .get_registration(registration.registration_id)
        .expect("Lookup should succeed")
        .expect("Registration should exist");
    assert_eq!(fetched.quantity, 4);
}
