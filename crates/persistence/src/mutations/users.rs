// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account mutations.

use diesel::prelude::*;
use eventhub_domain::Role;
use tracing::info;

use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new user account.
///
/// The email is normalized to lowercase for case-insensitive uniqueness,
/// and the password is hashed with bcrypt before it is stored.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The display username
/// * `email` - The email address (will be normalized)
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The user's role
///
/// # Errors
///
/// Returns `DuplicateEmail` if a user with this email already exists, or
/// an error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = email.to_lowercase();

    info!(
        "Creating user with username: {}, email: {}, role: {}",
        username, normalized_email, role
    );

    if queries::users::get_user_by_email(conn, &normalized_email)?.is_some() {
        return Err(PersistenceError::DuplicateEmail(normalized_email));
    }

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let created_at: String = crate::now_timestamp()?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::email.eq(&normalized_email),
            users::password_hash.eq(&password_hash),
            users::role.eq(role.as_str()),
            users::is_active.eq(1),
            users::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}
