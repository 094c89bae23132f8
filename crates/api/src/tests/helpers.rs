// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use eventhub_domain::Role;
use eventhub_persistence::Persistence;

use crate::{AuthenticatedActor, CreateEventRequest, CreateEventResponse, handlers};

pub const TEST_PASSWORD: &str = "Correct-Horse-7";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates a user account with the given role and returns the actor the
/// session layer would produce for it.
pub fn create_test_actor(
    persistence: &mut Persistence,
    username: &str,
    role: Role,
) -> AuthenticatedActor {
    let email: String = format!("{username}@example.com");
    let user_id: i64 = persistence
        .create_user(username, &email, TEST_PASSWORD, role)
        .expect("Failed to create test user");
    AuthenticatedActor::new(user_id, String::from(username), role)
}

pub fn create_test_event_request(capacity: i64) -> CreateEventRequest {
    CreateEventRequest {
        title: String::from("Rust Meetup"),
        category: Some(String::from("Tech")),
        venue: Some(String::from("Community Hall")),
        city: Some(String::from("Portland")),
        country: Some(String::from("USA")),
        description: None,
        image_url: None,
        price: Some(0.0),
        capacity,
        starts_at: Some(String::from("2026-09-01T18:00:00Z")),
        ends_at: None,
    }
}

/// Creates and publishes an event owned by `agent`, returning its ID.
pub fn create_published_event(
    persistence: &mut Persistence,
    agent: &AuthenticatedActor,
    capacity: i64,
) -> i64 {
    let created: CreateEventResponse =
        handlers::create_event(persistence, agent, create_test_event_request(capacity))
            .expect("Failed to create test event");
    let event_id: i64 = created.event.event_id;
    handlers::publish_event(persistence, agent, event_id).expect("Failed to publish test event");
    event_id
}
