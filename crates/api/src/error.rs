// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use eventhub_domain::DomainError;
use eventhub_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The permission required for this action.
        required: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract. The server layer maps each variant to an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The permission required for this action.
        required: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with existing state.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, required } => {
                Self::Unauthorized { action, required }
            }
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidUsername(msg) => ApiError::InvalidInput {
            field: String::from("username"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidQuantity { quantity } => ApiError::InvalidInput {
            field: String::from("quantity"),
            message: format!("Quantity must be at least 1, got {quantity}"),
        },
        DomainError::InvalidCapacity { capacity } => ApiError::InvalidInput {
            field: String::from("capacity"),
            message: format!("Capacity must be a non-negative integer, got {capacity}"),
        },
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidReactionKind(msg) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: msg,
        },
        DomainError::InvalidRegistrationStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
        DomainError::InvalidEventLifecycle(msg) => ApiError::InvalidInput {
            field: String::from("lifecycle"),
            message: msg,
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("Cannot transition a registration from {from} to {to}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found and conflict cases carry their own variants so the server
/// layer can map them to 404 and 409; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UserNotFound(user_id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {event_id} does not exist"),
        },
        PersistenceError::RegistrationNotFound(registration_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Registration"),
            message: format!("Registration {registration_id} does not exist"),
        },
        PersistenceError::ReactionNotFound(reaction_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Reaction"),
            message: format!("Reaction {reaction_id} does not exist"),
        },
        PersistenceError::DuplicateEmail(email) => ApiError::Conflict {
            rule: String::from("unique_email"),
            message: format!("A user with email '{email}' already exists"),
        },
        PersistenceError::DuplicateRegistration { user_id, event_id } => ApiError::Conflict {
            rule: String::from("unique_active_registration"),
            message: format!(
                "User {user_id} already holds an active registration for event {event_id}"
            ),
        },
        PersistenceError::EventNotOpen { event_id, lifecycle } => ApiError::DomainRuleViolation {
            rule: String::from("event_accepts_registrations"),
            message: format!(
                "Event {event_id} is {lifecycle} and does not accept registrations"
            ),
        },
        PersistenceError::InvalidLifecycleTransition { from, to } => {
            ApiError::DomainRuleViolation {
                rule: String::from("event_lifecycle"),
                message: format!("Cannot transition an event from {from} to {to}"),
            }
        }
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}
