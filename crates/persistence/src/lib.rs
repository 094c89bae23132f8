// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the EventHub registration service.
//!
//! This crate provides database persistence for users, events,
//! registrations, reactions, and sessions. It is built on Diesel over
//! `SQLite`.
//!
//! ## Storage model
//!
//! - `SQLite` is the only backend: in-memory databases for tests, a
//!   WAL-mode file database for deployments.
//! - Foreign key enforcement is switched on per connection and verified
//!   at startup.
//! - Timestamps are stored as ISO 8601 text, which sorts
//!   chronologically; the waitlist promotion order relies on this.
//!
//! ## Transactional core
//!
//! Registration admission and cancellation-with-promotion are
//! check-then-act sequences over the shared confirmed count. Both run
//! inside `immediate_transaction` (see `mutations::registrations`), so
//! concurrent requests for an event's last seat serialize instead of
//! both confirming.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases; the unique name
//! comes from an atomic counter, eliminating time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use eventhub_domain::{EventLifecycle, ReactionKind, RegistrationStatus, Role};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    AnalyticsTotals, CategoryCount, EventChanges, EventData, EventSearchPage, EventSearchParams,
    EventUtilization, NewEvent, ReactionData, RegistrationData, SessionData, UserData,
};
pub use error::PersistenceError;
pub use mutations::CancellationOutcome;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Formats the current UTC time as an ISO 8601 string.
pub(crate) fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::SerializationError(format!("Failed to format timestamp: {e}")))
}

/// Persistence adapter for the EventHub tables.
///
/// Owns a single `SQLite` connection; callers serialize access (the
/// server wraps the adapter in a mutex).
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users & sessions
    // ========================================================================

    /// Creates a new user account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if a user with this email already exists.
    pub fn create_user(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, email, password, role)
    }

    /// Retrieves a user by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Creates a session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session by token. Missing tokens are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Creates a new event in the `Draft` lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_event(&mut self, new: &NewEvent) -> Result<i64, PersistenceError> {
        mutations::events::create_event(&mut self.conn, new)
    }

    /// Applies optional field updates to an event and returns the
    /// updated row.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event does not exist.
    pub fn update_event(
        &mut self,
        event_id: i64,
        changes: &EventChanges,
    ) -> Result<EventData, PersistenceError> {
        mutations::events::update_event(&mut self.conn, event_id, changes)
    }

    /// Transitions an event to a new lifecycle state and returns the
    /// updated row.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` or `InvalidLifecycleTransition`.
    pub fn transition_event_lifecycle(
        &mut self,
        event_id: i64,
        target: EventLifecycle,
    ) -> Result<EventData, PersistenceError> {
        mutations::events::transition_lifecycle(&mut self.conn, event_id, target)
    }

    /// Retrieves an event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_event(&mut self, event_id: i64) -> Result<Option<EventData>, PersistenceError> {
        queries::events::get_event(&mut self.conn, event_id)
    }

    /// Searches published events, newest first, with pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_events(
        &mut self,
        params: &EventSearchParams,
    ) -> Result<EventSearchPage, PersistenceError> {
        queries::events::search_events(&mut self.conn, params)
    }

    // ========================================================================
    // Registrations
    // ========================================================================

    /// Creates a registration, deciding admission against the event's
    /// capacity inside a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound`, `EventNotOpen`, or
    /// `DuplicateRegistration`.
    pub fn create_registration(
        &mut self,
        user_id: i64,
        event_id: i64,
        quantity: i32,
    ) -> Result<RegistrationData, PersistenceError> {
        mutations::registrations::create_registration(&mut self.conn, user_id, event_id, quantity)
    }

    /// Cancels a registration and promotes the oldest waitlisted
    /// registration if a seat opened, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationNotFound` if the registration does not
    /// exist.
    pub fn cancel_registration(
        &mut self,
        registration_id: i64,
    ) -> Result<CancellationOutcome, PersistenceError> {
        mutations::registrations::cancel_registration(&mut self.conn, registration_id)
    }

    /// Retrieves a registration by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_registration(
        &mut self,
        registration_id: i64,
    ) -> Result<Option<RegistrationData>, PersistenceError> {
        queries::registrations::get_registration(&mut self.conn, registration_id)
    }

    /// Counts an event's registrations with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_registrations(
        &mut self,
        event_id: i64,
        status: RegistrationStatus,
    ) -> Result<i64, PersistenceError> {
        queries::registrations::count_for_event(&mut self.conn, event_id, status)
    }

    /// Lists a user's registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_registrations_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<RegistrationData>, PersistenceError> {
        queries::registrations::list_for_user(&mut self.conn, user_id)
    }

    /// Lists an event's registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_registrations_for_event(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<RegistrationData>, PersistenceError> {
        queries::registrations::list_for_event(&mut self.conn, event_id)
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    /// Adds a reaction; adding one that already exists returns the
    /// existing row.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if the event does not exist.
    pub fn add_reaction(
        &mut self,
        user_id: i64,
        event_id: i64,
        kind: ReactionKind,
    ) -> Result<ReactionData, PersistenceError> {
        mutations::reactions::add_reaction(&mut self.conn, user_id, event_id, kind)
    }

    /// Retrieves a reaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reaction(
        &mut self,
        reaction_id: i64,
    ) -> Result<Option<ReactionData>, PersistenceError> {
        queries::reactions::get_reaction(&mut self.conn, reaction_id)
    }

    /// Deletes a reaction by ID.
    ///
    /// # Errors
    ///
    /// Returns `ReactionNotFound` if the reaction does not exist.
    pub fn delete_reaction(&mut self, reaction_id: i64) -> Result<(), PersistenceError> {
        mutations::reactions::delete_reaction(&mut self.conn, reaction_id)
    }

    /// Lists an event's reactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reactions_for_event(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<ReactionData>, PersistenceError> {
        queries::reactions::list_for_event(&mut self.conn, event_id)
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    /// Computes system-wide totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn analytics_totals(&mut self) -> Result<AnalyticsTotals, PersistenceError> {
        queries::analytics::totals(&mut self.conn)
    }

    /// Counts events per category, sorted by category name.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn analytics_by_category(&mut self) -> Result<Vec<CategoryCount>, PersistenceError> {
        queries::analytics::by_category(&mut self.conn)
    }

    /// Computes per-event capacity utilization.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn analytics_utilization(&mut self) -> Result<Vec<EventUtilization>, PersistenceError> {
        queries::analytics::utilization(&mut self.conn)
    }
}
