// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reaction queries.

use diesel::prelude::*;
use eventhub_domain::ReactionKind;
use std::str::FromStr;

use crate::data_models::ReactionData;
use crate::diesel_schema::reactions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for reaction rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reactions)]
pub(crate) struct ReactionRow {
    reaction_id: i64,
    user_id: i64,
    event_id: i64,
    kind: String,
    created_at: String,
}

pub(crate) fn reaction_from_row(row: ReactionRow) -> Result<ReactionData, PersistenceError> {
    let kind: ReactionKind = ReactionKind::from_str(&row.kind)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(ReactionData {
        reaction_id: row.reaction_id,
        user_id: row.user_id,
        event_id: row.event_id,
        kind,
        created_at: row.created_at,
    })
}

/// Retrieves a reaction by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the reaction is not found.
pub fn get_reaction(
    conn: &mut SqliteConnection,
    reaction_id: i64,
) -> Result<Option<ReactionData>, PersistenceError> {
    let result: Result<ReactionRow, diesel::result::Error> = reactions::table
        .filter(reactions::reaction_id.eq(reaction_id))
        .select(ReactionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(reaction_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Finds a user's reaction of a given kind for an event, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_reaction(
    conn: &mut SqliteConnection,
    user_id: i64,
    event_id: i64,
    kind: ReactionKind,
) -> Result<Option<ReactionData>, PersistenceError> {
    let result: Result<ReactionRow, diesel::result::Error> = reactions::table
        .filter(reactions::user_id.eq(user_id))
        .filter(reactions::event_id.eq(event_id))
        .filter(reactions::kind.eq(kind.as_str()))
        .select(ReactionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(reaction_from_row(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists an event's reactions, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<ReactionData>, PersistenceError> {
    let rows: Vec<ReactionRow> = reactions::table
        .filter(reactions::event_id.eq(event_id))
        .order((
            reactions::created_at.desc(),
            reactions::reaction_id.desc(),
        ))
        .select(ReactionRow::as_select())
        .load(conn)?;

    rows.into_iter().map(reaction_from_row).collect()
}
