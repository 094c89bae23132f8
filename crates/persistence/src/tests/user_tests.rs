// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account and session persistence tests.

use eventhub_domain::Role;

use super::{create_test_persistence, create_test_user};
use crate::{PersistenceError, Persistence, SessionData, UserData};

#[test]
fn test_create_and_fetch_user() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user("alice", "Alice@Example.com", "correct horse battery", Role::User)
        .expect("User creation should succeed");

    let user: UserData = persistence
        .get_user_by_id(user_id)
        .expect("Lookup should succeed")
        .expect("User should exist");

    assert_eq!(user.username, "alice");
    // Email is stored lowercase.
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, "USER");
    assert!(user.is_active);
}

#[test]
fn test_password_is_stored_hashed() {
    let mut persistence: Persistence = create_test_persistence();

    let user_id: i64 = persistence
        .create_user("alice", "alice@example.com", "correct horse battery", Role::User)
        .expect("User creation should succeed");

    let user: UserData = persistence
        .get_user_by_id(user_id)
        .expect("Lookup should succeed")
        .expect("User should exist");

    assert_ne!(user.password_hash, "correct horse battery");
    assert!(bcrypt::verify("correct horse battery", &user.password_hash)
        .expect("Verification should run"));
}

#[test]
fn test_email_lookup_is_case_insensitive() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_user(&mut persistence, "alice");

    let found: Option<UserData> = persistence
        .get_user_by_email("ALICE@EXAMPLE.COM")
        .expect("Lookup should succeed");

    assert!(found.is_some());
}

#[test]
fn test_duplicate_email_rejected_case_insensitively() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .create_user("alice", "alice@example.com", "pw one two three", Role::User)
        .expect("First user should succeed");

    let result = persistence.create_user("alice2", "ALICE@example.com", "pw four five six", Role::User);

    match result {
        Err(PersistenceError::DuplicateEmail(email)) => {
            assert_eq!(email, "alice@example.com");
        }
        other => panic!("Expected DuplicateEmail, got {other:?}"),
    }
}

#[test]
fn test_get_missing_user_returns_none() {
    let mut persistence: Persistence = create_test_persistence();

    let by_id: Option<UserData> = persistence
        .get_user_by_id(12345)
        .expect("Lookup should succeed");
    let by_email: Option<UserData> = persistence
        .get_user_by_email("nobody@example.com")
        .expect("Lookup should succeed");

    assert!(by_id.is_none());
    assert!(by_email.is_none());
}

#[test]
fn test_session_roundtrip_and_delete() {
    let mut persistence: Persistence = create_test_persistence();
    let user_id: i64 = create_test_user(&mut persistence, "alice");

    persistence
        .create_session("session_test_token", user_id, "2027-01-01T00:00:00Z")
        .expect("Session creation should succeed");

    let session: SessionData = persistence
        .get_session_by_token("session_test_token")
        .expect("Lookup should succeed")
        .expect("Session should exist");
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, "2027-01-01T00:00:00Z");

    persistence
        .delete_session("session_test_token")
        .expect("Delete should succeed");

    let gone: Option<SessionData> = persistence
        .get_session_by_token("session_test_token")
        .expect("Lookup should succeed");
    assert!(gone.is_none());
}

#[test]
fn test_delete_missing_session_is_a_no_op() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .delete_session("session_never_created")
        .expect("Deleting a missing session should not error");
}
