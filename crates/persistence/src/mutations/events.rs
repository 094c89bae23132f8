// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event mutations.

use diesel::prelude::*;
use eventhub_domain::EventLifecycle;
use tracing::info;

use crate::data_models::{EventChanges, EventData, NewEvent};
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Diesel changeset for optional event field updates.
#[derive(AsChangeset)]
#[diesel(table_name = events)]
struct EventChangeset<'a> {
    title: Option<&'a str>,
    category: Option<&'a str>,
    venue: Option<&'a str>,
    city: Option<&'a str>,
    country: Option<&'a str>,
    description: Option<&'a str>,
    image_url: Option<&'a str>,
    price: Option<f64>,
    capacity: Option<i32>,
    starts_at: Option<&'a str>,
    ends_at: Option<&'a str>,
}

fn capacity_to_column(capacity: u32) -> Result<i32, PersistenceError> {
    i32::try_from(capacity)
        .map_err(|_| PersistenceError::Other(format!("Capacity {capacity} is out of range")))
}

/// Creates a new event in the `Draft` lifecycle state.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_event(conn: &mut SqliteConnection, new: &NewEvent) -> Result<i64, PersistenceError> {
    info!(
        "Creating event with title: {}, capacity: {}",
        new.title, new.capacity
    );

    let created_at: String = crate::now_timestamp()?;
    let capacity: i32 = capacity_to_column(new.capacity)?;

    diesel::insert_into(events::table)
        .values((
            events::title.eq(&new.title),
            events::category.eq(new.category.as_deref()),
            events::venue.eq(new.venue.as_deref()),
            events::city.eq(new.city.as_deref()),
            events::country.eq(new.country.as_deref()),
            events::description.eq(new.description.as_deref()),
            events::image_url.eq(new.image_url.as_deref()),
            events::price.eq(new.price),
            events::capacity.eq(capacity),
            events::lifecycle.eq(EventLifecycle::Draft.as_str()),
            events::starts_at.eq(new.starts_at.as_deref()),
            events::ends_at.eq(new.ends_at.as_deref()),
            events::created_by.eq(new.created_by),
            events::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;

    info!(event_id, "Event created successfully");

    Ok(event_id)
}

/// Applies optional field updates to an event.
///
/// `None` fields are left unchanged; an all-`None` changeset is a no-op.
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, or an error if
/// the update fails.
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    changes: &EventChanges,
) -> Result<EventData, PersistenceError> {
    if queries::events::get_event(conn, event_id)?.is_none() {
        return Err(PersistenceError::EventNotFound(event_id));
    }

    if !changes.is_empty() {
        let capacity: Option<i32> = match changes.capacity {
            Some(value) => Some(capacity_to_column(value)?),
            None => None,
        };

        let changeset: EventChangeset<'_> = EventChangeset {
            title: changes.title.as_deref(),
            category: changes.category.as_deref(),
            venue: changes.venue.as_deref(),
            city: changes.city.as_deref(),
            country: changes.country.as_deref(),
            description: changes.description.as_deref(),
            image_url: changes.image_url.as_deref(),
            price: changes.price,
            capacity,
            starts_at: changes.starts_at.as_deref(),
            ends_at: changes.ends_at.as_deref(),
        };

        diesel::update(events::table.filter(events::event_id.eq(event_id)))
            .set(&changeset)
            .execute(conn)?;

        info!(event_id, "Event updated");
    }

    queries::events::get_event(conn, event_id)?
        .ok_or(PersistenceError::EventNotFound(event_id))
}

/// Transitions an event to a new lifecycle state.
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, or
/// `InvalidLifecycleTransition` if the transition is not permitted.
pub fn transition_lifecycle(
    conn: &mut SqliteConnection,
    event_id: i64,
    target: EventLifecycle,
) -> Result<EventData, PersistenceError> {
    let event: EventData = queries::events::get_event(conn, event_id)?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    if !event.lifecycle.can_transition_to(target) {
        return Err(PersistenceError::InvalidLifecycleTransition {
            from: event.lifecycle.as_str().to_string(),
            to: target.as_str().to_string(),
        });
    }

    diesel::update(events::table.filter(events::event_id.eq(event_id)))
        .set(events::lifecycle.eq(target.as_str()))
        .execute(conn)?;

    info!(event_id, lifecycle = target.as_str(), "Event lifecycle transitioned");

    queries::events::get_event(conn, event_id)?
        .ok_or(PersistenceError::EventNotFound(event_id))
}
