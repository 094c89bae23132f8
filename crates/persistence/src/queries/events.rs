// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use eventhub_domain::EventLifecycle;
use std::str::FromStr;
use tracing::debug;

use crate::data_models::{EventData, EventSearchPage, EventSearchParams};
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Maximum page size for event search.
const MAX_PAGE_SIZE: i64 = 100;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
pub(crate) struct EventRow {
    event_id: i64,
    title: String,
    category: Option<String>,
    venue: Option<String>,
    city: Option<String>,
    country: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    price: Option<f64>,
    capacity: i32,
    lifecycle: String,
    starts_at: Option<String>,
    ends_at: Option<String>,
    created_by: i64,
    created_at: String,
}

pub(crate) fn event_from_row(row: EventRow) -> Result<EventData, PersistenceError> {
    let lifecycle: EventLifecycle = EventLifecycle::from_str(&row.lifecycle)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let capacity: u32 = u32::try_from(row.capacity).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "Negative capacity {} for event {}",
            row.capacity, row.event_id
        ))
    })?;

    Ok(EventData {
        event_id: row.event_id,
        title: row.title,
        category: row.category,
        venue: row.venue,
        city: row.city,
        country: row.country,
        description: row.description,
        image_url: row.image_url,
        price: row.price,
        capacity,
        lifecycle,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        created_by: row.created_by,
        created_at: row.created_at,
    })
}

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<EventData>, PersistenceError> {
    debug!("Looking up event by ID: {}", event_id);

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(event_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Builds the filtered base query for a search.
///
/// Only published events are listed. The free-text filter matches title,
/// city, and venue.
fn filtered(params: &EventSearchParams) -> events::BoxedQuery<'static, Sqlite> {
    let mut query = events::table
        .filter(events::lifecycle.eq(EventLifecycle::Published.as_str()))
        .into_boxed();

    if let Some(q) = &params.q {
        let needle: &str = q.trim();
        if !needle.is_empty() {
            let pattern: String = format!("%{needle}%");
            query = query.filter(
                events::title
                    .like(pattern.clone())
                    .or(events::city.assume_not_null().like(pattern.clone()))
                    .or(events::venue.assume_not_null().like(pattern)),
            );
        }
    }

    if let Some(category) = &params.category {
        query = query.filter(events::category.eq(category.clone()));
    }

    query
}

/// Searches published events, newest first, with pagination.
///
/// Page numbers are 1-based and clamped to at least 1; the page size is
/// clamped to 1..=100.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_events(
    conn: &mut SqliteConnection,
    params: &EventSearchParams,
) -> Result<EventSearchPage, PersistenceError> {
    let page: i64 = params.page.max(1);
    let limit: i64 = params.limit.clamp(1, MAX_PAGE_SIZE);
    let offset: i64 = (page - 1) * limit;

    debug!(page, limit, "Searching events");

    let total: i64 = filtered(params).count().get_result(conn)?;

    let rows: Vec<EventRow> = filtered(params)
        .order((events::created_at.desc(), events::event_id.desc()))
        .offset(offset)
        .limit(limit)
        .load(conn)?;

    let items: Vec<EventData> = rows
        .into_iter()
        .map(event_from_row)
        .collect::<Result<Vec<EventData>, PersistenceError>>()?;

    Ok(EventSearchPage {
        total,
        page,
        limit,
        items,
    })
}
