// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.

use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The opaque session token
/// * `user_id` - The user the session belongs to
/// * `expires_at` - ISO 8601 expiration timestamp
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!("Creating session for user ID: {}", user_id);

    let created_at: String = crate::now_timestamp()?;

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::created_at.eq(&created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;

    info!(session_id, user_id, "Session created");

    Ok(session_id)
}

/// Deletes a session by token.
///
/// Deleting a token that does not exist is a no-op.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        sessions::table.filter(sessions::session_token.eq(session_token)),
    )
    .execute(conn)?;

    debug!(deleted, "Session delete executed");

    Ok(())
}
