// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account queries.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: i32,
    created_at: String,
}

fn user_from_row(row: UserRow) -> UserData {
    UserData {
        user_id: row.user_id,
        username: row.username,
        email: row.email,
        password_hash: row.password_hash,
        role: row.role,
        is_active: row.is_active != 0,
        created_at: row.created_at,
    }
}

/// Retrieves a user by email address.
///
/// The email is normalized to lowercase for case-insensitive lookup.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user with this email exists.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let normalized_email: String = email.to_lowercase();

    debug!("Looking up user by email: {}", normalized_email);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::email.eq(&normalized_email))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(user_from_row(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(user_from_row(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
