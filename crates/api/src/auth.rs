// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use std::str::FromStr;
use time::{Duration, OffsetDateTime};

use eventhub_domain::Role;
use eventhub_persistence::{EventData, Persistence, RegistrationData, SessionData, UserData};

use crate::error::AuthError;

/// An authenticated actor with an associated role.
///
/// This represents a user account that has been authenticated and has
/// permission to perform certain actions based on its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The authenticated user's username.
    pub username: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, username: String, role: Role) -> Self {
        Self {
            user_id,
            username,
            role,
        }
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on its role and, for owned
/// resources, on ownership.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to create an event.
    ///
    /// Only Agent and Admin actors may create events.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor holds the plain User role.
    pub fn authorize_create_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_privileged() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("create_event"),
                required: String::from("Agent or Admin role"),
            })
        }
    }

    /// Checks if an actor is authorized to modify or publish an event.
    ///
    /// The event's creator and Admin actors may manage it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the event nor holds
    /// the Admin role.
    pub fn authorize_manage_event(
        actor: &AuthenticatedActor,
        event: &EventData,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Admin || event.created_by == actor.user_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("manage_event"),
                required: String::from("event ownership or Admin role"),
            })
        }
    }

    /// Checks if an actor is authorized to cancel a registration.
    ///
    /// The registration's owner and Admin actors may cancel it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the registration nor
    /// holds the Admin role.
    pub fn authorize_cancel_registration(
        actor: &AuthenticatedActor,
        registration: &RegistrationData,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Admin || registration.user_id == actor.user_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("cancel_registration"),
                required: String::from("registration ownership or Admin role"),
            })
        }
    }

    /// Checks if an actor is authorized to list an event's registrations.
    ///
    /// Only Agent and Admin actors may see other users' registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor holds the plain User role.
    pub fn authorize_list_event_registrations(
        actor: &AuthenticatedActor,
    ) -> Result<(), AuthError> {
        if actor.role.is_privileged() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("list_event_registrations"),
                required: String::from("Agent or Admin role"),
            })
        }
    }

    /// Checks if an actor is authorized to view analytics.
    ///
    /// Only Agent and Admin actors may view analytics.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor holds the plain User role.
    pub fn authorize_view_analytics(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_privileged() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("view_analytics"),
                required: String::from("Agent or Admin role"),
            })
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by email and password and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The account email
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist, is deactivated,
    /// or the password does not match. The failure reason is the same
    /// for an unknown email and a wrong password.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, UserData), AuthError> {
        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            })?;

        if !user.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        let verified: bool =
            bcrypt::verify(password, &user.password_hash).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Password verification error: {e}"),
                }
            })?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        let role: Role = Self::parse_role(&user.role)?;

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(user.user_id, user.username.clone(), role);

        Ok((session_token, authenticated_actor, user))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the
    /// account has been deactivated since the session was created.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        if !user.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        let role: Role = Self::parse_role(&user.role)?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(user.user_id, user.username.clone(), role);

        Ok((authenticated_actor, user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    fn parse_role(role: &str) -> Result<Role, AuthError> {
        Role::from_str(role).map_err(|_| AuthError::AuthenticationFailed {
            reason: format!("Invalid role: {role}"),
        })
    }

    /// Generates a session token.
    ///
    /// In a production system, this would use a cryptographically secure
    /// random number generator. For simplicity, we use a timestamp-based
    /// approach here.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: eventhub_persistence::PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
