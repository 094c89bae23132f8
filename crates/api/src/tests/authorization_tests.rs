// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role and ownership enforcement tests.

use eventhub_domain::Role;
use eventhub_persistence::Persistence;

use super::helpers::{
    create_published_event, create_test_actor, create_test_event_request, create_test_persistence,
};
use crate::{
    ApiError, AuthenticatedActor, CreateRegistrationRequest, UpdateEventRequest, handlers,
};

#[test]
fn test_plain_user_cannot_create_event() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedActor = create_test_actor(&mut persistence, "norma", Role::User);

    let result = handlers::create_event(&mut persistence, &user, create_test_event_request(10));

    match result {
        Err(ApiError::Unauthorized { action, .. }) => assert_eq!(action, "create_event"),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_agent_and_admin_can_create_events() {
    let mut persistence: Persistence = create_test_persistence();
    let agent: AuthenticatedActor = create_test_actor(&mut persistence, "agent", Role::Agent);
    let admin: AuthenticatedActor = create_test_actor(&mut persistence, "admin", Role::Admin);

    assert!(
        handlers::create_event(&mut persistence, &agent, create_test_event_request(10)).is_ok()
    );
    assert!(
        handlers::create_event(&mut persistence, &admin, create_test_event_request(10)).is_ok()
    );
}

#[test]
fn test_non_owner_agent_cannot_update_event() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: AuthenticatedActor = create_test_actor(&mut persistence, "owner", Role::Agent);
    let other: AuthenticatedActor = create_test_actor(&mut persistence, "other", Role::Agent);
    let event_id: i64 = create_published_event(&mut persistence, &owner, 10);

    let result = handlers::update_event(
        &mut persistence,
        &other,
        event_id,
        UpdateEventRequest {
            title: Some(String::from("Hijacked")),
            ..UpdateEventRequest::default()
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_admin_can_update_any_event() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: AuthenticatedActor = create_test_actor(&mut persistence, "owner", Role::Agent);
    let admin: AuthenticatedActor = create_test_actor(&mut persistence, "admin", Role::Admin);
    let event_id: i64 = create_published_event(&mut persistence, &owner, 10);

    let result = handlers::update_event(
        &mut persistence,
        &admin,
        event_id,
        UpdateEventRequest {
            title: Some(String::from("Corrected title")),
            ..UpdateEventRequest::default()
        },
    );

    assert!(result.is_ok());
}

#[test]
fn test_non_owner_cannot_cancel_registration() {
    let mut persistence: Persistence = create_test_persistence();
    let agent: AuthenticatedActor = create_test_actor(&mut persistence, "agent", Role::Agent);
    let alice: AuthenticatedActor = create_test_actor(&mut persistence, "alice", Role::User);
    let mallory: AuthenticatedActor = create_test_actor(&mut persistence, "mallory", Role::User);
    let event_id: i64 = create_published_event(&mut persistence, &agent, 10);

    let created = handlers::create_registration(
        &mut persistence,
        &alice,
        &CreateRegistrationRequest {
            event_id,
            quantity: 1,
        },
    )
    .expect("Registration should succeed");

    let result = handlers::cancel_registration(
        &mut persistence,
        &mallory,
        created.registration.registration_id,
    );

    match result {
        Err(ApiError::Unauthorized { action, .. }) => {
            assert_eq!(action, "cancel_registration");
        }
        other => panic!("Expected Unauthorized, got {other:?}"),
    }

    // The registration is untouched.
    let mine = handlers::list_my_registrations(&mut persistence, &alice)
        .expect("Listing should succeed");
    assert_eq!(mine.registrations[0].status, "CONFIRMED");
}

#[test]
fn test_admin_can_cancel_any_registration() {
    let mut persistence: Persistence = create_test_persistence();
    let agent: AuthenticatedActor = create_test_actor(&mut persistence, "agent", Role::Agent);
    let admin: AuthenticatedActor = create_test_actor(&mut persistence, "admin", Role::Admin);
    let alice: AuthenticatedActor = create_test_actor(&mut persistence, "alice", Role::User);
    let event_id: i64 = create_published_event(&mut persistence, &agent, 10);

    let created = handlers::create_registration(
        &mut persistence,
        &alice,
        &CreateRegistrationRequest {
            event_id,
            quantity: 1,
        },
    )
    .expect("Registration should succeed");

    let result = handlers::cancel_registration(
        &mut persistence,
        &admin,
        created.registration.registration_id,
    );

    assert!(result.is_ok());
}

#[test]
fn test_plain_user_cannot_list_event_registrations() {
    let mut persistence: Persistence = create_test_persistence();
    let agent: AuthenticatedActor = create_test_actor(&mut persistence, "agent", Role::Agent);
    let user: AuthenticatedActor = create_test_actor(&mut persistence, "norma", Role::User);
    let event_id: i64 = create_published_event(&mut persistence, &agent, 10);

    let result = handlers::list_event_registrations(&mut persistence, &user, event_id);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_plain_user_cannot_view_analytics() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedActor = create_test_actor(&mut persistence, "norma", Role::User);

    assert!(matches!(
        handlers::analytics_summary(&mut persistence, &user),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        handlers::analytics_by_category(&mut persistence, &user),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        handlers::analytics_utilization(&mut persistence, &user),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_agent_can_view_analytics() {
    let mut persistence: Persistence = create_test_persistence();
    let agent: AuthenticatedActor = create_test_actor(&mut persistence, "agent", Role::Agent);

    let summary = handlers::analytics_summary(&mut persistence, &agent)
        .expect("Analytics should succeed");
    assert_eq!(summary.total_users, 1);
}

#[test]
fn test_non_owner_cannot_remove_reaction() {
    let mut persistence: Persistence = create_test_persistence();
    let agent: AuthenticatedActor = create_test_actor(&mut persistence, "agent", Role::Agent);
    let alice: AuthenticatedActor = create_test_actor(&mut persistence, "alice", Role::User);
    let mallory: AuthenticatedActor = create_test_actor(&mut persistence, "mallory", Role::User);
    let event_id: i64 = create_published_event(&mut persistence, &agent, 10);

    let added = handlers::add_reaction(
        &mut persistence,
        &alice,
        &crate::AddReactionRequest {
            event_id,
            kind: String::from("LIKE"),
        },
    )
    .expect("Reaction should succeed");

    let result =
        handlers::remove_reaction(&mut persistence, &mallory, added.reaction.reaction_id);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
