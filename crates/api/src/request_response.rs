// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

use eventhub_persistence::{
    AnalyticsTotals, CategoryCount, EventData, EventUtilization, ReactionData, RegistrationData,
    UserData,
};

/// API request to create a new user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// The display username.
    pub username: String,
    /// The email address (unique, case-insensitive).
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// Public view of a user account.
///
/// The password hash never leaves the persistence layer through this
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user's ID.
    pub user_id: i64,
    /// The display username.
    pub username: String,
    /// The email address.
    pub email: String,
    /// The user's role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<UserData> for UserInfo {
    fn from(user: UserData) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// API response for a successful signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    /// The created account.
    pub user: UserInfo,
    /// A success message.
    pub message: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The account email.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The opaque session token.
    pub token: String,
    /// The authenticated account.
    pub user: UserInfo,
}

/// API response for a whoami lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The authenticated account.
    pub user: UserInfo,
}

/// Public view of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The event's ID.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// Optional category.
    pub category: Option<String>,
    /// Optional venue name.
    pub venue: Option<String>,
    /// Optional city.
    pub city: Option<String>,
    /// Optional country.
    pub country: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Optional ticket price.
    pub price: Option<f64>,
    /// Confirmed-seat limit. Zero means unlimited.
    pub capacity: u32,
    /// Lifecycle state (`DRAFT`, `PUBLISHED`, `CLOSED`).
    pub lifecycle: String,
    /// Optional start timestamp (ISO 8601).
    pub starts_at: Option<String>,
    /// Optional end timestamp (ISO 8601).
    pub ends_at: Option<String>,
    /// The creating user's ID.
    pub created_by: i64,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<EventData> for EventInfo {
    fn from(event: EventData) -> Self {
        Self {
            event_id: event.event_id,
            title: event.title,
            category: event.category,
            venue: event.venue,
            city: event.city,
            country: event.country,
            description: event.description,
            image_url: event.image_url,
            price: event.price,
            capacity: event.capacity,
            lifecycle: event.lifecycle.as_str().to_string(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            created_by: event.created_by,
            created_at: event.created_at,
        }
    }
}

/// API request to create an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// The event title.
    pub title: String,
    /// Optional category.
    pub category: Option<String>,
    /// Optional venue name.
    pub venue: Option<String>,
    /// Optional city.
    pub city: Option<String>,
    /// Optional country.
    pub country: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Optional ticket price.
    pub price: Option<f64>,
    /// Confirmed-seat limit. Zero means unlimited.
    pub capacity: i64,
    /// Optional start timestamp (ISO 8601).
    pub starts_at: Option<String>,
    /// Optional end timestamp (ISO 8601).
    pub ends_at: Option<String>,
}

/// API response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    /// The created event.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// API request to update an event. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    /// New title.
    pub title: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New venue name.
    pub venue: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New ticket price.
    pub price: Option<f64>,
    /// New confirmed-seat limit. Zero means unlimited.
    pub capacity: Option<i64>,
    /// New start timestamp (ISO 8601).
    pub starts_at: Option<String>,
    /// New end timestamp (ISO 8601).
    pub ends_at: Option<String>,
}

/// API response for a successful event update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventResponse {
    /// The updated event.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful event publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishEventResponse {
    /// The published event.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// API request to search published events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEventsRequest {
    /// Free-text match over title, city, and venue.
    pub q: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
    /// 1-based page number; defaults to 1.
    pub page: Option<i64>,
    /// Page size; defaults to 20, clamped to 1..=100.
    pub limit: Option<i64>,
}

/// API response for an event search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEventsResponse {
    /// Total matching events across all pages.
    pub total: i64,
    /// The returned page number (1-based).
    pub page: i64,
    /// The page size used.
    pub limit: i64,
    /// The events on this page, newest first.
    pub items: Vec<EventInfo>,
}

/// Public view of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInfo {
    /// The registration's ID.
    pub registration_id: i64,
    /// The registering user's ID.
    pub user_id: i64,
    /// The event's ID.
    pub event_id: i64,
    /// The status (`CONFIRMED`, `WAITLIST`, `CANCELLED`).
    pub status: String,
    /// Number of seats requested.
    pub quantity: i32,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<RegistrationData> for RegistrationInfo {
    fn from(registration: RegistrationData) -> Self {
        Self {
            registration_id: registration.registration_id,
            user_id: registration.user_id,
            event_id: registration.event_id,
            status: registration.status.as_str().to_string(),
            quantity: registration.quantity,
            created_at: registration.created_at,
        }
    }
}

/// API request to register for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    /// The event to register for.
    pub event_id: i64,
    /// Number of seats requested (must be at least 1).
    pub quantity: i64,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRegistrationResponse {
    /// The created registration (`CONFIRMED` or `WAITLIST`).
    pub registration: RegistrationInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRegistrationResponse {
    /// The cancelled registration.
    pub registration: RegistrationInfo,
    /// The waitlisted registration promoted into the freed seat, if any.
    pub promoted: Option<RegistrationInfo>,
    /// A success message.
    pub message: String,
}

/// API response for a registration listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRegistrationsResponse {
    /// The registrations, newest first.
    pub registrations: Vec<RegistrationInfo>,
}

/// Public view of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionInfo {
    /// The reaction's ID.
    pub reaction_id: i64,
    /// The reacting user's ID.
    pub user_id: i64,
    /// The event's ID.
    pub event_id: i64,
    /// The reaction kind (`LIKE`, `SAVE`).
    pub kind: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<ReactionData> for ReactionInfo {
    fn from(reaction: ReactionData) -> Self {
        Self {
            reaction_id: reaction.reaction_id,
            user_id: reaction.user_id,
            event_id: reaction.event_id,
            kind: reaction.kind.as_str().to_string(),
            created_at: reaction.created_at,
        }
    }
}

/// API request to add a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReactionRequest {
    /// The event to react to.
    pub event_id: i64,
    /// The reaction kind (`LIKE`, `SAVE`).
    pub kind: String,
}

/// API response for a successful reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReactionResponse {
    /// The reaction (existing row if the reaction was already present).
    pub reaction: ReactionInfo,
}

/// API response for a reaction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReactionsResponse {
    /// The event's reactions, newest first.
    pub reactions: Vec<ReactionInfo>,
}

/// API response for system-wide analytics totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummaryResponse {
    /// Total user accounts.
    pub total_users: i64,
    /// Total events (all lifecycles).
    pub total_events: i64,
    /// Total confirmed registrations.
    pub total_registrations_confirmed: i64,
    /// Total waitlisted registrations.
    pub total_waitlist: i64,
    /// Total like reactions.
    pub total_likes: i64,
    /// Total save reactions.
    pub total_saves: i64,
}

impl From<AnalyticsTotals> for AnalyticsSummaryResponse {
    fn from(totals: AnalyticsTotals) -> Self {
        Self {
            total_users: totals.total_users,
            total_events: totals.total_events,
            total_registrations_confirmed: totals.total_registrations_confirmed,
            total_waitlist: totals.total_waitlist,
            total_likes: totals.total_likes,
            total_saves: totals.total_saves,
        }
    }
}

/// Event count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCountInfo {
    /// The category name (`General` for uncategorized events).
    pub category: String,
    /// Number of events in this category.
    pub count: i64,
}

impl From<CategoryCount> for CategoryCountInfo {
    fn from(count: CategoryCount) -> Self {
        Self {
            category: count.category,
            count: count.count,
        }
    }
}

/// API response for the by-category analytics breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsByCategoryResponse {
    /// Per-category counts, sorted by category name.
    pub categories: Vec<CategoryCountInfo>,
}

/// Confirmed seats against capacity for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUtilizationInfo {
    /// The event's ID.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// Confirmed-seat limit. Zero means unlimited.
    pub capacity: u32,
    /// Confirmed registration count.
    pub confirmed: i64,
    /// Waitlisted registration count.
    pub waitlisted: i64,
}

impl From<EventUtilization> for EventUtilizationInfo {
    fn from(utilization: EventUtilization) -> Self {
        Self {
            event_id: utilization.event_id,
            title: utilization.title,
            capacity: utilization.capacity,
            confirmed: utilization.confirmed,
            waitlisted: utilization.waitlisted,
        }
    }
}

/// API response for the per-event utilization breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsUtilizationResponse {
    /// Per-event utilization rows.
    pub events: Vec<EventUtilizationInfo>,
}
