// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod event_tests;
mod registration_tests;
mod user_tests;

use eventhub_domain::{EventLifecycle, Role};

use crate::{NewEvent, Persistence};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_user(persistence: &mut Persistence, username: &str) -> i64 {
    let email: String = format!("{username}@example.com");
    persistence
        .create_user(username, &email, "correct horse battery", Role::User)
        .expect("Failed to create test user")
}

pub fn create_test_event_spec(created_by: i64, capacity: u32) -> NewEvent {
    NewEvent {
        title: String::from("Rust Meetup"),
        category: Some(String::from("Tech")),
        venue: Some(String::from("Community Hall")),
        city: Some(String::from("Portland")),
        country: Some(String::from("USA")),
        description: Some(String::from("Monthly Rust meetup")),
        image_url: None,
        price: Some(0.0),
        capacity,
        starts_at: Some(String::from("2026-09-01T18:00:00Z")),
        ends_at: Some(String::from("2026-09-01T21:00:00Z")),
        created_by,
    }
}

/// Creates an event and publishes it so it accepts registrations.
pub fn create_published_event(
    persistence: &mut Persistence,
    created_by: i64,
    capacity: u32,
) -> i64 {
    let event_id: i64 = persistence
        .create_event(&create_test_event_spec(created_by, capacity))
        .expect("Failed to create test event");
    persistence
        .transition_event_lifecycle(event_id, EventLifecycle::Published)
        .expect("Failed to publish test event");
    event_id
}
