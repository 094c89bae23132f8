// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested user was not found.
    UserNotFound(i64),
    /// The requested event was not found.
    EventNotFound(i64),
    /// The requested registration was not found.
    RegistrationNotFound(i64),
    /// The requested reaction was not found.
    ReactionNotFound(i64),
    /// The requested session was not found.
    SessionNotFound(String),
    /// A user with this email already exists.
    DuplicateEmail(String),
    /// The user already holds an active registration for this event.
    DuplicateRegistration {
        /// The registering user.
        user_id: i64,
        /// The target event.
        event_id: i64,
    },
    /// The event is not accepting registrations in its current lifecycle state.
    EventNotOpen {
        /// The target event.
        event_id: i64,
        /// The event's current lifecycle state.
        lifecycle: String,
    },
    /// The requested lifecycle transition is not permitted.
    InvalidLifecycleTransition {
        /// The current lifecycle state.
        from: String,
        /// The requested lifecycle state.
        to: String,
    },
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UserNotFound(id) => write!(f, "User not found: {id}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::RegistrationNotFound(id) => write!(f, "Registration not found: {id}"),
            Self::ReactionNotFound(id) => write!(f, "Reaction not found: {id}"),
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "A user with email {email} already exists")
            }
            Self::DuplicateRegistration { user_id, event_id } => {
                write!(
                    f,
                    "User {user_id} already holds an active registration for event {event_id}"
                )
            }
            Self::EventNotOpen {
                event_id,
                lifecycle,
            } => {
                write!(
                    f,
                    "Event {event_id} is not accepting registrations (lifecycle: {lifecycle})"
                )
            }
            Self::InvalidLifecycleTransition { from, to } => {
                write!(f, "Invalid lifecycle transition: {from} -> {to}")
            }
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(kind, info) => match kind {
                diesel::result::DatabaseErrorKind::UniqueViolation => {
                    Self::DatabaseError(format!("Unique constraint violation: {}", info.message()))
                }
                diesel::result::DatabaseErrorKind::ForeignKeyViolation => {
                    Self::DatabaseError(format!(
                        "Foreign key constraint violation: {}",
                        info.message()
                    ))
                }
                _ => Self::DatabaseError(info.message().to_string()),
            },
            diesel::result::Error::NotFound => Self::QueryFailed(String::from("Record not found")),
            other => Self::QueryFailed(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
