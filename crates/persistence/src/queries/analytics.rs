// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate analytics queries.
//!
//! These are read-only rollups over the whole table state; nothing here
//! participates in the admission transaction.

use diesel::dsl::count;
use diesel::prelude::*;
use eventhub_domain::{ReactionKind, RegistrationStatus};
use std::collections::HashMap;

use crate::data_models::{AnalyticsTotals, CategoryCount, EventUtilization};
use crate::diesel_schema::{events, reactions, registrations, users};
use crate::error::PersistenceError;

/// Category label used for events without a category.
const UNCATEGORIZED: &str = "General";

/// Computes system-wide totals.
///
/// # Errors
///
/// Returns an error if any of the underlying count queries fails.
pub fn totals(conn: &mut SqliteConnection) -> Result<AnalyticsTotals, PersistenceError> {
    let total_users: i64 = users::table.count().get_result(conn)?;
    let total_events: i64 = events::table.count().get_result(conn)?;

    let total_registrations_confirmed: i64 = registrations::table
        .filter(registrations::status.eq(RegistrationStatus::Confirmed.as_str()))
        .count()
        .get_result(conn)?;
    let total_waitlist: i64 = registrations::table
        .filter(registrations::status.eq(RegistrationStatus::Waitlist.as_str()))
        .count()
        .get_result(conn)?;

    let total_likes: i64 = reactions::table
        .filter(reactions::kind.eq(ReactionKind::Like.as_str()))
        .count()
        .get_result(conn)?;
    let total_saves: i64 = reactions::table
        .filter(reactions::kind.eq(ReactionKind::Save.as_str()))
        .count()
        .get_result(conn)?;

    Ok(AnalyticsTotals {
        total_users,
        total_events,
        total_registrations_confirmed,
        total_waitlist,
        total_likes,
        total_saves,
    })
}

/// Counts events per category, sorted by category name.
///
/// Events without a category are grouped under "General".
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn by_category(conn: &mut SqliteConnection) -> Result<Vec<CategoryCount>, PersistenceError> {
    let rows: Vec<(Option<String>, i64)> = events::table
        .group_by(events::category)
        .select((events::category, count(events::event_id)))
        .load(conn)?;

    let mut counts: Vec<CategoryCount> = rows
        .into_iter()
        .map(|(category, n)| CategoryCount {
            category: category.unwrap_or_else(|| String::from(UNCATEGORIZED)),
            count: n,
        })
        .collect();
    counts.sort_by(|a, b| a.category.cmp(&b.category));

    Ok(counts)
}

/// Counts registrations per event with the given status, as a map.
fn status_counts_by_event(
    conn: &mut SqliteConnection,
    status: RegistrationStatus,
) -> Result<HashMap<i64, i64>, PersistenceError> {
    let rows: Vec<(i64, i64)> = registrations::table
        .filter(registrations::status.eq(status.as_str()))
        .group_by(registrations::event_id)
        .select((registrations::event_id, count(registrations::registration_id)))
        .load(conn)?;

    Ok(rows.into_iter().collect())
}

/// Computes per-event capacity utilization.
///
/// # Errors
///
/// Returns an error if a database query fails or an event row carries a
/// negative capacity.
pub fn utilization(conn: &mut SqliteConnection) -> Result<Vec<EventUtilization>, PersistenceError> {
    let event_rows: Vec<(i64, String, i32)> = events::table
        .select((events::event_id, events::title, events::capacity))
        .order(events::event_id.asc())
        .load(conn)?;

    let confirmed: HashMap<i64, i64> =
        status_counts_by_event(conn, RegistrationStatus::Confirmed)?;
    let waitlisted: HashMap<i64, i64> = status_counts_by_event(conn, RegistrationStatus::Waitlist)?;

    event_rows
        .into_iter()
        .map(|(event_id, title, raw_capacity)| {
            let capacity: u32 = u32::try_from(raw_capacity).map_err(|_| {
                PersistenceError::SerializationError(format!(
                    "Negative capacity {raw_capacity} for event {event_id}"
                ))
            })?;
            Ok(EventUtilization {
                event_id,
                title,
                capacity,
                confirmed: confirmed.get(&event_id).copied().unwrap_or(0),
                waitlisted: waitlisted.get(&event_id).copied().unwrap_or(0),
            })
        })
        .collect()
}
