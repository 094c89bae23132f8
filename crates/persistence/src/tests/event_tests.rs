// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event lifecycle, update, and search tests.

use eventhub_domain::EventLifecycle;

use super::{create_published_event, create_test_event_spec, create_test_persistence, create_test_user};
use crate::{EventChanges, EventData, EventSearchPage, EventSearchParams, NewEvent, PersistenceError, Persistence};

#[test]
fn test_create_event_starts_as_draft() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");

    let event_id: i64 = persistence
        .create_event(&create_test_event_spec(owner, 50))
        .expect("Event creation should succeed");

    let event: EventData = persistence
        .get_event(event_id)
        .expect("Lookup should succeed")
        .expect("Event should exist");
    assert_eq!(event.lifecycle, EventLifecycle::Draft);
    assert_eq!(event.capacity, 50);
    assert_eq!(event.created_by, owner);
}

#[test]
fn test_lifecycle_draft_to_published_to_closed() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = persistence
        .create_event(&create_test_event_spec(owner, 10))
        .expect("Event creation should succeed");

    let published: EventData = persistence
        .transition_event_lifecycle(event_id, EventLifecycle::Published)
        .expect("Publish should succeed");
    assert_eq!(published.lifecycle, EventLifecycle::Published);

    let closed: EventData = persistence
        .transition_event_lifecycle(event_id, EventLifecycle::Closed)
        .expect("Close should succeed");
    assert_eq!(closed.lifecycle, EventLifecycle::Closed);
}

#[test]
fn test_invalid_lifecycle_transitions_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = persistence
        .create_event(&create_test_event_spec(owner, 10))
        .expect("Event creation should succeed");

    // Draft -> Closed skips Published.
    let result = persistence.transition_event_lifecycle(event_id, EventLifecycle::Closed);
    assert!(matches!(
        result,
        Err(PersistenceError::InvalidLifecycleTransition { .. })
    ));

    persistence
        .transition_event_lifecycle(event_id, EventLifecycle::Published)
        .expect("Publish should succeed");

    // Published -> Draft is not a legal rollback.
    let back: Result<EventData, PersistenceError> =
        persistence.transition_event_lifecycle(event_id, EventLifecycle::Draft);
    assert!(matches!(
        back,
        Err(PersistenceError::InvalidLifecycleTransition { .. })
    ));
}

#[test]
fn test_transition_nonexistent_event_fails() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.transition_event_lifecycle(9999, EventLifecycle::Published);

    assert!(matches!(result, Err(PersistenceError::EventNotFound(9999))));
}

#[test]
fn test_update_event_changes_only_provided_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = persistence
        .create_event(&create_test_event_spec(owner, 10))
        .expect("Event creation should succeed");

    let changes: EventChanges = EventChanges {
        title: Some(String::from("Rust Meetup (rescheduled)")),
        capacity: Some(25),
        ..EventChanges::default()
    };

    let updated: EventData = persistence
        .update_event(event_id, &changes)
        .expect("Update should succeed");

    assert_eq!(updated.title, "Rust Meetup (rescheduled)");
    assert_eq!(updated.capacity, 25);
    // Untouched fields survive.
    assert_eq!(updated.category.as_deref(), Some("Tech"));
    assert_eq!(updated.city.as_deref(), Some("Portland"));
}

#[test]
fn test_update_with_empty_changes_is_a_no_op() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");
    let event_id: i64 = persistence
        .create_event(&create_test_event_spec(owner, 10))
        .expect("Event creation should succeed");

    let unchanged: EventData = persistence
        .update_event(event_id, &EventChanges::default())
        .expect("Empty update should succeed");
    assert_eq!(unchanged.title, "Rust Meetup");
    assert_eq!(unchanged.capacity, 10);
}

#[test]
fn test_update_nonexistent_event_fails() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.update_event(777, &EventChanges::default());

    assert!(matches!(result, Err(PersistenceError::EventNotFound(777))));
}

#[test]
fn test_search_returns_only_published_events() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");

    // One draft, one published.
    persistence
        .create_event(&create_test_event_spec(owner, 10))
        .expect("Event creation should succeed");
    let published_id: i64 = create_published_event(&mut persistence, owner, 10);

    let page: EventSearchPage = persistence
        .search_events(&EventSearchParams {
            page: 1,
            limit: 20,
            ..EventSearchParams::default()
        })
        .expect("Search should succeed");

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].event_id, published_id);
}

#[test]
fn test_search_free_text_matches_title_city_and_venue() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");

    let mut jazz: NewEvent = create_test_event_spec(owner, 10);
    jazz.title = String::from("Jazz Night");
    jazz.city = Some(String::from("New Orleans"));
    jazz.venue = Some(String::from("Blue Room"));
    let jazz_id: i64 = persistence
        .create_event(&jazz)
        .expect("Event creation should succeed");
    persistence
        .transition_event_lifecycle(jazz_id, EventLifecycle::Published)
        .expect("Publish should succeed");

    create_published_event(&mut persistence, owner, 10);

    for query in ["Jazz", "Orleans", "Blue"] {
        let page: EventSearchPage = persistence
            .search_events(&EventSearchParams {
                q: Some(String::from(query)),
                page: 1,
                limit: 20,
                ..EventSearchParams::default()
            })
            .expect("Search should succeed");
        assert_eq!(page.total, 1, "query {query:?} should match one event");
        assert_eq!(page.items[0].event_id, jazz_id);
    }
}

#[test]
fn test_search_filters_by_category() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");

    let mut music: NewEvent = create_test_event_spec(owner, 10);
    music.category = Some(String::from("Music"));
    let music_id: i64 = persistence
        .create_event(&music)
        .expect("Event creation should succeed");
    persistence
        .transition_event_lifecycle(music_id, EventLifecycle::Published)
        .expect("Publish should succeed");

    create_published_event(&mut persistence, owner, 10);

    let page: EventSearchPage = persistence
        .search_events(&EventSearchParams {
            category: Some(String::from("Music")),
            page: 1,
            limit: 20,
            ..EventSearchParams::default()
        })
        .expect("Search should succeed");

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].event_id, music_id);
}

#[test]
fn test_search_pagination_clamps_and_pages() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: i64 = create_test_user(&mut persistence, "owner");

    for _ in 0..5 {
        create_published_event(&mut persistence, owner, 10);
    }

    let first_page: EventSearchPage = persistence
        .search_events(&EventSearchParams {
            page: 1,
            limit: 2,
            ..EventSearchParams::default()
        })
        .expect("Search should succeed");
    assert_eq!(first_page.total, 5);
    assert_eq!(first_page.items.len(), 2);

    let third_page: EventSearchPage = persistence
        .search_events(&EventSearchParams {
            page: 3,
            limit: 2,
            ..EventSearchParams::default()
        })
        .expect("Search should succeed");
    assert_eq!(third_page.items.len(), 1);

    // Out-of-range page numbers clamp rather than error.
    let clamped: EventSearchPage = persistence
        .search_events(&EventSearchParams {
            page: 0,
            limit: 0,
            ..EventSearchParams::default()
        })
        .expect("Search should succeed");
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.limit, 1);
}
