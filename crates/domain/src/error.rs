// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The registration status string is not recognized.
    InvalidRegistrationStatus(String),
    /// The event lifecycle string is not recognized.
    InvalidEventLifecycle(String),
    /// The reaction kind string is not recognized.
    InvalidReactionKind(String),
    /// The role string is not recognized.
    InvalidRole(String),
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The event title is empty or invalid.
    InvalidTitle(String),
    /// The username is empty or invalid.
    InvalidUsername(String),
    /// The email address is invalid.
    InvalidEmail(String),
    /// The registration quantity is not positive.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },
    /// The event capacity is negative or out of range.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegistrationStatus(s) => {
                write!(f, "Invalid registration status: {s}")
            }
            Self::InvalidEventLifecycle(s) => write!(f, "Invalid event lifecycle: {s}"),
            Self::InvalidReactionKind(s) => write!(f, "Invalid reaction kind: {s}"),
            Self::InvalidRole(s) => write!(f, "Invalid role: {s}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid status transition: {from} -> {to}")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidQuantity { quantity } => {
                write!(f, "Quantity must be positive, got {quantity}")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "Capacity must be non-negative, got {capacity}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
