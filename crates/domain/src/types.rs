// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle status of a registration.
///
/// A registration is created as either `Confirmed` or `Waitlist` by the
/// admission decision, and transitions at most twice afterwards.
/// `Cancelled` is terminal: no transition ever returns a cancelled
/// registration to an active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// The registration holds a seat against the event's capacity.
    Confirmed,
    /// The registration is queued for promotion, FIFO by creation time.
    Waitlist,
    /// The registration was cancelled. Terminal.
    Cancelled,
}

impl FromStr for RegistrationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(Self::Confirmed),
            "WAITLIST" => Ok(Self::Waitlist),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidRegistrationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RegistrationStatus {
    /// Converts this status to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Waitlist => "WAITLIST",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Confirmed` → `Cancelled`
    /// - `Waitlist` → `Confirmed` (promotion)
    /// - `Waitlist` → `Cancelled`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Confirmed, Self::Cancelled)
                | (Self::Waitlist, Self::Confirmed)
                | (Self::Waitlist, Self::Cancelled)
        )
    }

    /// Returns whether this registration still competes for or holds a seat.
    ///
    /// Active registrations block duplicate registration attempts by the
    /// same user for the same event.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Waitlist)
    }
}

/// The lifecycle state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventLifecycle {
    /// Initial state after creation. Not visible for registration.
    #[default]
    Draft,
    /// Open for registration.
    Published,
    /// No longer accepting registrations.
    Closed,
}

impl FromStr for EventLifecycle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidEventLifecycle(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventLifecycle {
    /// Converts this lifecycle state to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Closed => "CLOSED",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are Draft → Published and Published → Closed.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published) | (Self::Published, Self::Closed)
        )
    }

    /// Returns whether the event accepts new registrations.
    #[must_use]
    pub const fn accepts_registrations(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// The kind of a user reaction to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// The user liked the event.
    Like,
    /// The user saved the event for later.
    Save,
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(Self::Like),
            "SAVE" => Ok(Self::Save),
            _ => Err(DomainError::InvalidReactionKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReactionKind {
    /// Converts this kind to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Save => "SAVE",
        }
    }
}

/// User roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular attendee. May register for events and manage their own
    /// registrations and reactions.
    #[default]
    User,
    /// Event organizer. May create and manage events and view
    /// per-event registration lists and analytics.
    Agent,
    /// System administrator. May perform any action, including
    /// cancelling registrations on behalf of other users.
    Admin,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "AGENT" => Ok(Self::Agent),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Role {
    /// Converts this role to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Agent => "AGENT",
            Self::Admin => "ADMIN",
        }
    }

    /// Returns whether this role carries organizer privileges.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        matches!(self, Self::Agent | Self::Admin)
    }
}

/// The confirmed-seat limit of an event.
///
/// A capacity of zero means the event is unconstrained: every admission
/// is confirmed regardless of the current confirmed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a new capacity. Zero means unlimited.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self(limit)
    }

    /// The raw seat limit. Zero means unlimited.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.0
    }

    /// Returns whether this capacity places no bound on admissions.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
