// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of an event title.
const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a username.
const MAX_USERNAME_LENGTH: usize = 50;

/// Validates an event title.
///
/// # Errors
///
/// Returns an error if the title is empty, whitespace-only, or longer
/// than 200 characters.
pub fn validate_event_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a username.
///
/// # Errors
///
/// Returns an error if the username is empty, whitespace-only, or longer
/// than 50 characters.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(DomainError::InvalidUsername(format!(
            "Username cannot exceed {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates an email address.
///
/// This is a structural check only: a single `@` with a non-empty local
/// part and a domain part containing a dot. Deliverability is not
/// verified.
///
/// # Errors
///
/// Returns an error if the email does not have the expected shape.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must contain '@'",
        )));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "Email '{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validates a registration quantity.
///
/// # Errors
///
/// Returns an error if the quantity is zero or negative.
pub const fn validate_quantity(quantity: i64) -> Result<(), DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Validates a raw event capacity value.
///
/// Zero is valid and means unlimited.
///
/// # Errors
///
/// Returns an error if the capacity is negative or does not fit in `u32`.
pub const fn validate_capacity(capacity: i64) -> Result<u32, DomainError> {
    if capacity < 0 || capacity > u32::MAX as i64 {
        return Err(DomainError::InvalidCapacity { capacity });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(capacity as u32)
}
