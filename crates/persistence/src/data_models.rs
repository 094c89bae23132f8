// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use eventhub_domain::{EventLifecycle, ReactionKind, RegistrationStatus};
use serde::{Deserialize, Serialize};

/// Serializable representation of a user account.
///
/// The `role` is kept as its persisted string; the API layer parses it
/// into a typed role when building an authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

/// Serializable representation of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: i64,
    pub title: String,
    pub category: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    /// Confirmed-seat limit. Zero means unlimited.
    pub capacity: u32,
    pub lifecycle: EventLifecycle,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

/// Serializable representation of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationData {
    pub registration_id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub status: RegistrationStatus,
    pub quantity: i32,
    pub created_at: String,
}

/// Serializable representation of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionData {
    pub reaction_id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub kind: ReactionKind,
    pub created_at: String,
}

/// Serializable representation of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// Optional field updates for an event.
///
/// `None` fields are left unchanged. There is no way to null out a field
/// through this struct; clearing an optional column is not a supported
/// operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<u32>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

impl EventChanges {
    /// Returns whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.venue.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.price.is_none()
            && self.capacity.is_none()
            && self.starts_at.is_none()
            && self.ends_at.is_none()
    }
}

/// Fields for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub category: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    /// Confirmed-seat limit. Zero means unlimited.
    pub capacity: u32,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub created_by: i64,
}

/// Search parameters for the paginated event listing.
#[derive(Debug, Clone, Default)]
pub struct EventSearchParams {
    /// Free-text match over title, city, and venue.
    pub q: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: i64,
    /// Page size.
    pub limit: i64,
}

/// One page of event search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSearchPage {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub items: Vec<EventData>,
}

/// Aggregate counts across the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsTotals {
    pub total_users: i64,
    pub total_events: i64,
    pub total_registrations_confirmed: i64,
    pub total_waitlist: i64,
    pub total_likes: i64,
    pub total_saves: i64,
}

/// Event count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Confirmed seats against capacity for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUtilization {
    pub event_id: i64,
    pub title: String,
    /// Zero means unlimited.
    pub capacity: u32,
    pub confirmed: i64,
    pub waitlisted: i64,
}
