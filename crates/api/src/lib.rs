// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the EventHub registration service.
//!
//! This crate sits between the HTTP server and the persistence layer:
//! it owns the request/response contract, the API error taxonomy,
//! session authentication, role-based authorization, and the password
//! policy. Handlers never leak domain or persistence errors directly;
//! every failure is translated into an [`ApiError`] variant the server
//! can map onto an HTTP status.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_reaction, analytics_by_category, analytics_summary, analytics_utilization,
    cancel_registration, create_event, create_registration, get_event, list_event_registrations,
    list_my_registrations, list_reactions, login, logout, publish_event, remove_reaction,
    search_events, signup, update_event, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AddReactionRequest, AddReactionResponse, AnalyticsByCategoryResponse,
    AnalyticsSummaryResponse, AnalyticsUtilizationResponse, CancelRegistrationResponse,
    CategoryCountInfo, CreateEventRequest, CreateEventResponse, CreateRegistrationRequest,
    CreateRegistrationResponse, EventInfo, EventUtilizationInfo, ListReactionsResponse,
    ListRegistrationsResponse, LoginRequest, LoginResponse, PublishEventResponse, ReactionInfo,
    RegistrationInfo, SearchEventsRequest, SearchEventsResponse, SignupRequest, SignupResponse,
    UpdateEventRequest, UpdateEventResponse, UserInfo, WhoAmIResponse,
};
