// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration queries, including the capacity accountant.

use diesel::prelude::*;
use eventhub_domain::RegistrationStatus;
use std::str::FromStr;
use tracing::debug;

use crate::data_models::RegistrationData;
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;

/// Diesel Queryable struct for registration rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = registrations)]
pub(crate) struct RegistrationRow {
    registration_id: i64,
    user_id: i64,
    event_id: i64,
    status: String,
    quantity: i32,
    created_at: String,
}

pub(crate) fn registration_from_row(
    row: RegistrationRow,
) -> Result<RegistrationData, PersistenceError> {
    let status: RegistrationStatus = RegistrationStatus::from_str(&row.status)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(RegistrationData {
        registration_id: row.registration_id,
        user_id: row.user_id,
        event_id: row.event_id,
        status,
        quantity: row.quantity,
        created_at: row.created_at,
    })
}

/// Retrieves a registration by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the registration is not found.
pub fn get_registration(
    conn: &mut SqliteConnection,
    registration_id: i64,
) -> Result<Option<RegistrationData>, PersistenceError> {
    debug!("Looking up registration by ID: {}", registration_id);

    let result: Result<RegistrationRow, diesel::result::Error> = registrations::table
        .filter(registrations::registration_id.eq(registration_id))
        .select(RegistrationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(registration_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Finds the user's active (confirmed or waitlisted) registration for an
/// event, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_active_registration(
    conn: &mut SqliteConnection,
    user_id: i64,
    event_id: i64,
) -> Result<Option<RegistrationData>, PersistenceError> {
    let result: Result<RegistrationRow, diesel::result::Error> = registrations::table
        .filter(registrations::user_id.eq(user_id))
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::status.ne(RegistrationStatus::Cancelled.as_str()))
        .select(RegistrationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(registration_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts registrations for an event with the given status.
///
/// This is the capacity accountant shared by admission and promotion.
/// It is a pure read; callers that follow it with a write must invoke it
/// inside the same transaction so the count reflects a consistent
/// snapshot.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    status: RegistrationStatus,
) -> Result<i64, PersistenceError> {
    let count: i64 = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::status.eq(status.as_str()))
        .count()
        .get_result(conn)?;

    Ok(count)
}

/// Finds the oldest waitlisted registration for an event.
///
/// Promotion order is FIFO by creation time; the row ID breaks ties
/// between registrations created within the same timestamp.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn oldest_waitlisted(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<RegistrationData>, PersistenceError> {
    let result: Result<RegistrationRow, diesel::result::Error> = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::status.eq(RegistrationStatus::Waitlist.as_str()))
        .order((
            registrations::created_at.asc(),
            registrations::registration_id.asc(),
        ))
        .select(RegistrationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(registration_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists a user's registrations, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<RegistrationData>, PersistenceError> {
    let rows: Vec<RegistrationRow> = registrations::table
        .filter(registrations::user_id.eq(user_id))
        .order((
            registrations::created_at.desc(),
            registrations::registration_id.desc(),
        ))
        .select(RegistrationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(registration_from_row).collect()
}

/// Lists an event's registrations, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<RegistrationData>, PersistenceError> {
    let rows: Vec<RegistrationRow> = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .order((
            registrations::created_at.desc(),
            registrations::registration_id.desc(),
        ))
        .select(RegistrationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(registration_from_row).collect()
}
