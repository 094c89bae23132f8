// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reaction mutations.

use diesel::prelude::*;
use eventhub_domain::ReactionKind;
use tracing::{debug, info};

use crate::data_models::ReactionData;
use crate::diesel_schema::reactions;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Adds a reaction for a user to an event.
///
/// Adding a reaction that already exists returns the existing row
/// unchanged; a unique constraint on (user, event, kind) backs this at
/// the schema level.
///
/// # Errors
///
/// Returns `EventNotFound` if the event does not exist, or an error if
/// the insert fails.
pub fn add_reaction(
    conn: &mut SqliteConnection,
    user_id: i64,
    event_id: i64,
    kind: ReactionKind,
) -> Result<ReactionData, PersistenceError> {
    if queries::events::get_event(conn, event_id)?.is_none() {
        return Err(PersistenceError::EventNotFound(event_id));
    }

    if let Some(existing) = queries::reactions::find_reaction(conn, user_id, event_id, kind)? {
        debug!(
            reaction_id = existing.reaction_id,
            "Reaction already exists; returning existing row"
        );
        return Ok(existing);
    }

    let created_at: String = crate::now_timestamp()?;

    diesel::insert_into(reactions::table)
        .values((
            reactions::user_id.eq(user_id),
            reactions::event_id.eq(event_id),
            reactions::kind.eq(kind.as_str()),
            reactions::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let reaction_id: i64 = get_last_insert_rowid(conn)?;

    info!(reaction_id, user_id, event_id, kind = kind.as_str(), "Reaction added");

    Ok(ReactionData {
        reaction_id,
        user_id,
        event_id,
        kind,
        created_at,
    })
}

/// Deletes a reaction by ID.
///
/// # Errors
///
/// Returns `ReactionNotFound` if the reaction does not exist.
pub fn delete_reaction(
    conn: &mut SqliteConnection,
    reaction_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(reactions::table.filter(reactions::reaction_id.eq(reaction_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::ReactionNotFound(reaction_id));
    }

    info!(reaction_id, "Reaction deleted");

    Ok(())
}
