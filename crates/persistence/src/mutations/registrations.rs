// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration mutations: admission and cancellation with waitlist
//! promotion.
//!
//! Both mutations are check-then-act sequences over the shared confirmed
//! count, so each runs inside `immediate_transaction`. SQLite takes the
//! write lock when an immediate transaction begins, which serializes two
//! concurrent admissions racing for an event's last seat: the second one
//! observes the first one's committed row and waitlists.

use diesel::connection::Connection;
use diesel::prelude::*;
use eventhub_domain::{Capacity, RegistrationStatus, decide_admission, has_open_slot};
use tracing::{debug, info};

use crate::data_models::{EventData, RegistrationData};
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// The result of a cancellation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationOutcome {
    /// The cancelled registration (status `Cancelled`).
    pub registration: RegistrationData,
    /// Whether the registration was already cancelled before this call.
    /// An already-cancelled registration never triggers a promotion.
    pub already_cancelled: bool,
    /// The waitlisted registration promoted into the freed seat, if any.
    pub promoted: Option<RegistrationData>,
}

fn confirmed_count(conn: &mut SqliteConnection, event_id: i64) -> Result<u32, PersistenceError> {
    let count: i64 =
        queries::registrations::count_for_event(conn, event_id, RegistrationStatus::Confirmed)?;
    u32::try_from(count).map_err(|_| {
        PersistenceError::Other(format!(
            "Confirmed count {count} for event {event_id} is out of range"
        ))
    })
}

/// Creates a registration for a user, deciding admission against the
/// event's capacity.
///
/// The capacity read and the row insert commit atomically. The admission
/// decision itself is `eventhub_domain::decide_admission`; capacity zero
/// admits unconditionally.
///
/// # Errors
///
/// * `EventNotFound` if the event does not exist
/// * `EventNotOpen` if the event is not in the `Published` lifecycle
/// * `DuplicateRegistration` if the user already holds an active
///   registration for this event
pub fn create_registration(
    conn: &mut SqliteConnection,
    user_id: i64,
    event_id: i64,
    quantity: i32,
) -> Result<RegistrationData, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let event: EventData = queries::events::get_event(conn, event_id)?
            .ok_or(PersistenceError::EventNotFound(event_id))?;

        if !event.lifecycle.accepts_registrations() {
            return Err(PersistenceError::EventNotOpen {
                event_id,
                lifecycle: event.lifecycle.as_str().to_string(),
            });
        }

        if queries::registrations::find_active_registration(conn, user_id, event_id)?.is_some() {
            return Err(PersistenceError::DuplicateRegistration { user_id, event_id });
        }

        let confirmed: u32 = confirmed_count(conn, event_id)?;
        let status: RegistrationStatus =
            decide_admission(Capacity::new(event.capacity), confirmed);
        let created_at: String = crate::now_timestamp()?;

        diesel::insert_into(registrations::table)
            .values((
                registrations::user_id.eq(user_id),
                registrations::event_id.eq(event_id),
                registrations::status.eq(status.as_str()),
                registrations::quantity.eq(quantity),
                registrations::created_at.eq(&created_at),
            ))
            .execute(conn)?;

        let registration_id: i64 = get_last_insert_rowid(conn)?;

        info!(
            registration_id,
            user_id,
            event_id,
            status = status.as_str(),
            confirmed,
            capacity = event.capacity,
            "Registration admitted"
        );

        Ok(RegistrationData {
            registration_id,
            user_id,
            event_id,
            status,
            quantity,
            created_at,
        })
    })
}

/// Cancels a registration and promotes the oldest waitlisted registration
/// for the event if the cancellation freed a seat.
///
/// Cancelling an already-cancelled registration is an idempotent no-op;
/// it never triggers a second promotion. Both writes (the cancellation
/// and the promotion) commit in the same transaction, so a failure
/// leaves neither a stranded waitlist entry nor a half-applied cancel.
///
/// At most one registration is promoted per call, FIFO by creation time.
///
/// # Errors
///
/// Returns `RegistrationNotFound` if the registration does not exist.
/// Ownership is not checked here; the API layer authorizes the caller
/// before invoking this mutation.
pub fn cancel_registration(
    conn: &mut SqliteConnection,
    registration_id: i64,
) -> Result<CancellationOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let mut registration: RegistrationData =
            queries::registrations::get_registration(conn, registration_id)?
                .ok_or(PersistenceError::RegistrationNotFound(registration_id))?;

        if registration.status == RegistrationStatus::Cancelled {
            debug!(registration_id, "Registration already cancelled; no-op");
            return Ok(CancellationOutcome {
                registration,
                already_cancelled: true,
                promoted: None,
            });
        }

        diesel::update(
            registrations::table.filter(registrations::registration_id.eq(registration_id)),
        )
        .set(registrations::status.eq(RegistrationStatus::Cancelled.as_str()))
        .execute(conn)?;
        registration.status = RegistrationStatus::Cancelled;

        info!(
            registration_id,
            event_id = registration.event_id,
            "Registration cancelled"
        );

        let event: EventData = queries::events::get_event(conn, registration.event_id)?
            .ok_or(PersistenceError::EventNotFound(registration.event_id))?;

        let capacity: Capacity = Capacity::new(event.capacity);
        let confirmed: u32 = confirmed_count(conn, registration.event_id)?;

        let mut promoted: Option<RegistrationData> = None;
        if has_open_slot(capacity, confirmed) {
            if let Some(mut next) =
                queries::registrations::oldest_waitlisted(conn, registration.event_id)?
            {
                diesel::update(
                    registrations::table
                        .filter(registrations::registration_id.eq(next.registration_id)),
                )
                .set(registrations::status.eq(RegistrationStatus::Confirmed.as_str()))
                .execute(conn)?;
                next.status = RegistrationStatus::Confirmed;

                info!(
                    promoted_registration_id = next.registration_id,
                    event_id = registration.event_id,
                    "Waitlisted registration promoted"
                );

                promoted = Some(next);
            }
        }

        Ok(CancellationOutcome {
            registration,
            already_cancelled: false,
            promoted,
        })
    })
}
