// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler enforces authorization before touching persistence and
//! translates lower-layer errors into the API error taxonomy. The server
//! layer maps the results onto HTTP.

use std::str::FromStr;
use tracing::info;

use eventhub_domain::{
    EventLifecycle, ReactionKind, Role, validate_capacity, validate_email, validate_event_title,
    validate_quantity, validate_username,
};
use eventhub_persistence::{
    CancellationOutcome, EventChanges, EventData, EventSearchPage, EventSearchParams, NewEvent,
    Persistence, ReactionData, RegistrationData, UserData,
};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AddReactionRequest, AddReactionResponse, AnalyticsByCategoryResponse,
    AnalyticsSummaryResponse, AnalyticsUtilizationResponse, CancelRegistrationResponse,
    CategoryCountInfo, CreateEventRequest, CreateEventResponse, CreateRegistrationRequest,
    CreateRegistrationResponse, EventInfo, EventUtilizationInfo, ListReactionsResponse,
    ListRegistrationsResponse, LoginRequest, LoginResponse, PublishEventResponse, ReactionInfo,
    RegistrationInfo, SearchEventsRequest, SearchEventsResponse, SignupRequest, SignupResponse,
    UpdateEventRequest, UpdateEventResponse, UserInfo, WhoAmIResponse,
};

/// Default page size for event search.
const DEFAULT_PAGE_SIZE: i64 = 20;

fn event_not_found(event_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Event"),
        message: format!("Event {event_id} does not exist"),
    }
}

// ============================================================================
// Accounts & sessions
// ============================================================================

/// Creates a new user account with the default User role.
///
/// # Errors
///
/// Returns an error if a field fails validation, the password violates
/// the policy, or the email is already taken.
pub fn signup(
    persistence: &mut Persistence,
    request: &SignupRequest,
) -> Result<SignupResponse, ApiError> {
    validate_username(&request.username).map_err(translate_domain_error)?;
    validate_email(&request.email).map_err(translate_domain_error)?;
    PasswordPolicy::default().validate(&request.password, &request.username, &request.email)?;

    let user_id: i64 = persistence
        .create_user(&request.username, &request.email, &request.password, Role::User)
        .map_err(translate_persistence_error)?;

    let user: UserData = persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("User {user_id} missing immediately after creation"),
        })?;

    info!(user_id, username = %user.username, "Account created");

    Ok(SignupResponse {
        user: UserInfo::from(user),
        message: format!("Account '{}' created", request.username),
    })
}

/// Authenticates a user and creates a session.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for an unknown email, a wrong
/// password, or a deactivated account.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (token, actor, user) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;

    info!(user_id = actor.user_id, "Login succeeded");

    Ok(LoginResponse {
        token,
        user: UserInfo::from(user),
    })
}

/// Deletes the session behind a token.
///
/// # Errors
///
/// Returns an error if the session delete fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the account behind a session token.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the session is invalid or expired.
pub fn whoami(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<WhoAmIResponse, ApiError> {
    let (_actor, user) = AuthenticationService::validate_session(persistence, session_token)?;

    Ok(WhoAmIResponse {
        user: UserInfo::from(user),
    })
}

// ============================================================================
// Events
// ============================================================================

/// Creates an event owned by the actor, in the Draft lifecycle.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor holds the Agent or Admin
/// role, or `InvalidInput` if a field fails validation.
pub fn create_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateEventRequest,
) -> Result<CreateEventResponse, ApiError> {
    AuthorizationService::authorize_create_event(actor)?;

    validate_event_title(&request.title).map_err(translate_domain_error)?;
    let capacity: u32 = validate_capacity(request.capacity).map_err(translate_domain_error)?;

    let new: NewEvent = NewEvent {
        title: request.title,
        category: request.category,
        venue: request.venue,
        city: request.city,
        country: request.country,
        description: request.description,
        image_url: request.image_url,
        price: request.price,
        capacity,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
        created_by: actor.user_id,
    };

    let event_id: i64 = persistence
        .create_event(&new)
        .map_err(translate_persistence_error)?;

    let event: EventData = persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Event {event_id} missing immediately after creation"),
        })?;

    Ok(CreateEventResponse {
        event: EventInfo::from(event),
        message: format!("Event {event_id} created as draft"),
    })
}

/// Applies optional field updates to an event.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing event, `Unauthorized`
/// unless the actor owns the event or holds the Admin role, or
/// `InvalidInput` if a field fails validation.
pub fn update_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
    request: UpdateEventRequest,
) -> Result<UpdateEventResponse, ApiError> {
    let event: EventData = persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(event_id))?;

    AuthorizationService::authorize_manage_event(actor, &event)?;

    if let Some(title) = &request.title {
        validate_event_title(title).map_err(translate_domain_error)?;
    }
    let capacity: Option<u32> = match request.capacity {
        Some(value) => Some(validate_capacity(value).map_err(translate_domain_error)?),
        None => None,
    };

    let changes: EventChanges = EventChanges {
        title: request.title,
        category: request.category,
        venue: request.venue,
        city: request.city,
        country: request.country,
        description: request.description,
        image_url: request.image_url,
        price: request.price,
        capacity,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
    };

    let updated: EventData = persistence
        .update_event(event_id, &changes)
        .map_err(translate_persistence_error)?;

    Ok(UpdateEventResponse {
        event: EventInfo::from(updated),
        message: format!("Event {event_id} updated"),
    })
}

/// Publishes a draft event so it accepts registrations.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing event, `Unauthorized`
/// unless the actor owns the event or holds the Admin role, or
/// `DomainRuleViolation` if the event is not in the Draft lifecycle.
pub fn publish_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
) -> Result<PublishEventResponse, ApiError> {
    let event: EventData = persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(event_id))?;

    AuthorizationService::authorize_manage_event(actor, &event)?;

    let published: EventData = persistence
        .transition_event_lifecycle(event_id, EventLifecycle::Published)
        .map_err(translate_persistence_error)?;

    info!(event_id, "Event published");

    Ok(PublishEventResponse {
        event: EventInfo::from(published),
        message: format!("Event {event_id} published"),
    })
}

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist.
pub fn get_event(persistence: &mut Persistence, event_id: i64) -> Result<EventInfo, ApiError> {
    let event: EventData = persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(event_id))?;

    Ok(EventInfo::from(event))
}

/// Searches published events, newest first, with pagination.
///
/// # Errors
///
/// Returns an error if the underlying query fails.
pub fn search_events(
    persistence: &mut Persistence,
    request: &SearchEventsRequest,
) -> Result<SearchEventsResponse, ApiError> {
    let params: EventSearchParams = EventSearchParams {
        q: request.q.clone(),
        category: request.category.clone(),
        page: request.page.unwrap_or(1),
        limit: request.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page: EventSearchPage = persistence
        .search_events(&params)
        .map_err(translate_persistence_error)?;

    Ok(SearchEventsResponse {
        total: page.total,
        page: page.page,
        limit: page.limit,
        items: page.items.into_iter().map(EventInfo::from).collect(),
    })
}

// ============================================================================
// Registrations
// ============================================================================

/// Registers the actor for an event, confirming or waitlisting against
/// the event's capacity.
///
/// # Errors
///
/// * `InvalidInput` if the quantity is below 1
/// * `ResourceNotFound` if the event does not exist
/// * `DomainRuleViolation` if the event is not published
/// * `Conflict` if the actor already holds an active registration
pub fn create_registration(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateRegistrationRequest,
) -> Result<CreateRegistrationResponse, ApiError> {
    validate_quantity(request.quantity).map_err(translate_domain_error)?;
    let quantity: i32 = i32::try_from(request.quantity).map_err(|_| ApiError::InvalidInput {
        field: String::from("quantity"),
        message: format!("Quantity {} is out of range", request.quantity),
    })?;

    let registration: RegistrationData = persistence
        .create_registration(actor.user_id, request.event_id, quantity)
        .map_err(translate_persistence_error)?;

    let message: String = format!(
        "Registration {} is {}",
        registration.registration_id,
        registration.status.as_str()
    );

    Ok(CreateRegistrationResponse {
        registration: RegistrationInfo::from(registration),
        message,
    })
}

/// Cancels a registration, promoting the oldest waitlisted registration
/// if a seat opened.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing registration, or
/// `Unauthorized` unless the actor owns the registration or holds the
/// Admin role.
pub fn cancel_registration(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    registration_id: i64,
) -> Result<CancelRegistrationResponse, ApiError> {
    let registration: RegistrationData = persistence
        .get_registration(registration_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Registration"),
            message: format!("Registration {registration_id} does not exist"),
        })?;

    AuthorizationService::authorize_cancel_registration(actor, &registration)?;

    let outcome: CancellationOutcome = persistence
        .cancel_registration(registration_id)
        .map_err(translate_persistence_error)?;

    let message: String = if outcome.already_cancelled {
        format!("Registration {registration_id} was already cancelled")
    } else {
        format!("Registration {registration_id} cancelled")
    };

    Ok(CancelRegistrationResponse {
        registration: RegistrationInfo::from(outcome.registration),
        promoted: outcome.promoted.map(RegistrationInfo::from),
        message,
    })
}

/// Lists the actor's own registrations, newest first.
///
/// # Errors
///
/// Returns an error if the underlying query fails.
pub fn list_my_registrations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListRegistrationsResponse, ApiError> {
    let registrations: Vec<RegistrationData> = persistence
        .list_registrations_for_user(actor.user_id)
        .map_err(translate_persistence_error)?;

    Ok(ListRegistrationsResponse {
        registrations: registrations
            .into_iter()
            .map(RegistrationInfo::from)
            .collect(),
    })
}

/// Lists an event's registrations, newest first.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor holds the Agent or Admin
/// role, or `ResourceNotFound` for a missing event.
pub fn list_event_registrations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
) -> Result<ListRegistrationsResponse, ApiError> {
    AuthorizationService::authorize_list_event_registrations(actor)?;

    if persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(event_not_found(event_id));
    }

    let registrations: Vec<RegistrationData> = persistence
        .list_registrations_for_event(event_id)
        .map_err(translate_persistence_error)?;

    Ok(ListRegistrationsResponse {
        registrations: registrations
            .into_iter()
            .map(RegistrationInfo::from)
            .collect(),
    })
}

// ============================================================================
// Reactions
// ============================================================================

/// Adds a reaction from the actor to an event. Idempotent.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown kind or `ResourceNotFound`
/// for a missing event.
pub fn add_reaction(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &AddReactionRequest,
) -> Result<AddReactionResponse, ApiError> {
    let kind: ReactionKind =
        ReactionKind::from_str(&request.kind).map_err(translate_domain_error)?;

    let reaction: ReactionData = persistence
        .add_reaction(actor.user_id, request.event_id, kind)
        .map_err(translate_persistence_error)?;

    Ok(AddReactionResponse {
        reaction: ReactionInfo::from(reaction),
    })
}

/// Removes a reaction.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing reaction, or
/// `Unauthorized` unless the actor owns the reaction or holds the
/// Admin role.
pub fn remove_reaction(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    reaction_id: i64,
) -> Result<(), ApiError> {
    let reaction: ReactionData = persistence
        .get_reaction(reaction_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Reaction"),
            message: format!("Reaction {reaction_id} does not exist"),
        })?;

    if actor.role != Role::Admin && reaction.user_id != actor.user_id {
        return Err(ApiError::Unauthorized {
            action: String::from("remove_reaction"),
            required: String::from("reaction ownership or Admin role"),
        });
    }

    persistence
        .delete_reaction(reaction_id)
        .map_err(translate_persistence_error)?;

    Ok(())
}

/// Lists an event's reactions, newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist.
pub fn list_reactions(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<ListReactionsResponse, ApiError> {
    if persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(event_not_found(event_id));
    }

    let reactions: Vec<ReactionData> = persistence
        .list_reactions_for_event(event_id)
        .map_err(translate_persistence_error)?;

    Ok(ListReactionsResponse {
        reactions: reactions.into_iter().map(ReactionInfo::from).collect(),
    })
}

// ============================================================================
// Analytics
// ============================================================================

/// Returns system-wide totals.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor holds the Agent or Admin
/// role.
pub fn analytics_summary(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<AnalyticsSummaryResponse, ApiError> {
    AuthorizationService::authorize_view_analytics(actor)?;

    let totals = persistence
        .analytics_totals()
        .map_err(translate_persistence_error)?;

    Ok(AnalyticsSummaryResponse::from(totals))
}

/// Returns event counts per category.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor holds the Agent or Admin
/// role.
pub fn analytics_by_category(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<AnalyticsByCategoryResponse, ApiError> {
    AuthorizationService::authorize_view_analytics(actor)?;

    let categories = persistence
        .analytics_by_category()
        .map_err(translate_persistence_error)?;

    Ok(AnalyticsByCategoryResponse {
        categories: categories.into_iter().map(CategoryCountInfo::from).collect(),
    })
}

/// Returns per-event capacity utilization.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor holds the Agent or Admin
/// role.
pub fn analytics_utilization(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<AnalyticsUtilizationResponse, ApiError> {
    AuthorizationService::authorize_view_analytics(actor)?;

    let events = persistence
        .analytics_utilization()
        .map_err(translate_persistence_error)?;

    Ok(AnalyticsUtilizationResponse {
        events: events.into_iter().map(EventUtilizationInfo::from).collect(),
    })
}
