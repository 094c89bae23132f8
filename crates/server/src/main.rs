// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use eventhub_api::{
    AddReactionRequest, AddReactionResponse, AnalyticsByCategoryResponse,
    AnalyticsSummaryResponse, AnalyticsUtilizationResponse, ApiError, CreateEventRequest,
    CreateEventResponse, CreateRegistrationRequest, CreateRegistrationResponse, EventInfo,
    ListReactionsResponse, ListRegistrationsResponse, LoginRequest, LoginResponse,
    PublishEventResponse, SearchEventsRequest, SearchEventsResponse, SignupRequest,
    SignupResponse, UpdateEventRequest, UpdateEventResponse, WhoAmIResponse, add_reaction,
    analytics_by_category, analytics_summary, analytics_utilization, cancel_registration,
    create_event, create_registration, get_event, list_event_registrations,
    list_my_registrations, list_reactions, login, logout, publish_event, remove_reaction,
    search_events, signup, update_event, whoami,
};
use eventhub_domain::Role;
use eventhub_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::{SessionError, SessionUser, bearer_token};

/// EventHub Server - HTTP server for the EventHub ticketing backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Email for the bootstrap admin account. Created on startup if absent.
    #[arg(long, requires = "admin_password")]
    admin_email: Option<String>,

    /// Password for the bootstrap admin account.
    #[arg(long, requires = "admin_email")]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the live event broadcaster.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for accounts, events, and registrations.
    persistence: Arc<Mutex<Persistence>>,
    /// Broadcaster for the read-only live event stream.
    live: LiveEventBroadcaster,
}

/// Response for the health check endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is up.
    status: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: match err {
                SessionError::MissingAuthorizationHeader => {
                    String::from("Missing Authorization header")
                }
                SessionError::InvalidAuthorizationHeader => {
                    String::from("Invalid Authorization header format. Expected: 'Bearer <token>'")
                }
                SessionError::InvalidSession(reason) => {
                    format!("Session validation failed: {reason}")
                }
            },
        }
    }
}

/// Handler for GET `/health`.
#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/auth/register`.
///
/// Creates a new user account with the USER role.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SignupResponse = signup(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: &str = bearer_token(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, token)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/auth/whoami`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let token: &str = bearer_token(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: WhoAmIResponse = whoami(&mut persistence, token)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/search`.
async fn handle_search_events(
    AxumState(app_state): AxumState<AppState>,
    Query(req): Query<SearchEventsRequest>,
) -> Result<Json<SearchEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SearchEventsResponse = search_events(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{id}`.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let event: EventInfo = get_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(event))
}

/// Handler for POST `/events`.
///
/// Creates a draft event. Requires the AGENT or ADMIN role.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), HttpError> {
    info!(username = %actor.username, title = %req.title, "Handling create_event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse = create_event(&mut persistence, &actor, req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/events/{id}`.
///
/// Applies a partial update. Requires the owning agent or an admin.
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(event_id): Path<i64>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<UpdateEventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateEventResponse =
        update_event(&mut persistence, &actor, event_id, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events/{id}/publish`.
///
/// Transitions a draft event to PUBLISHED and announces it on the live
/// stream. Requires the owning agent or an admin.
async fn handle_publish_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<PublishEventResponse>, HttpError> {
    info!(username = %actor.username, event_id = event_id, "Handling publish_event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PublishEventResponse =
        publish_event(&mut persistence, &actor, event_id)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::EventPublished {
        event_id: response.event.event_id,
        title: response.event.title.clone(),
    });

    Ok(Json(response))
}

/// Handler for POST `/registrations`.
///
/// Admits the caller to an event, confirming a seat or waitlisting.
async fn handle_create_registration(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<CreateRegistrationResponse>), HttpError> {
    info!(
        username = %actor.username,
        event_id = req.event_id,
        quantity = req.quantity,
        "Handling create_registration request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateRegistrationResponse =
        create_registration(&mut persistence, &actor, &req)?;
    drop(persistence);

    let registration_id: i64 = response.registration.registration_id;
    let event_id: i64 = response.registration.event_id;
    if response.registration.status == "WAITLIST" {
        app_state.live.broadcast(&LiveEvent::RegistrationWaitlisted {
            registration_id,
            event_id,
        });
    } else {
        app_state.live.broadcast(&LiveEvent::RegistrationConfirmed {
            registration_id,
            event_id,
        });
    }

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for DELETE `/registrations/{id}`.
///
/// Cancels a registration, promoting the oldest waitlisted one if a
/// confirmed seat was freed. Requires the owner or an admin.
async fn handle_cancel_registration(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(registration_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(
        username = %actor.username,
        registration_id = registration_id,
        "Handling cancel_registration request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response = cancel_registration(&mut persistence, &actor, registration_id)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::RegistrationCancelled {
        registration_id: response.registration.registration_id,
        event_id: response.registration.event_id,
    });
    if let Some(promoted) = response.promoted {
        app_state.live.broadcast(&LiveEvent::WaitlistPromoted {
            registration_id: promoted.registration_id,
            event_id: promoted.event_id,
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/registrations/me`.
async fn handle_list_my_registrations(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<ListRegistrationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListRegistrationsResponse =
        list_my_registrations(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/registrations/event/{id}`.
///
/// Lists all registrations for an event. Requires AGENT or ADMIN.
async fn handle_list_event_registrations(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<ListRegistrationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListRegistrationsResponse =
        list_event_registrations(&mut persistence, &actor, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reactions`.
async fn handle_add_reaction(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<AddReactionRequest>,
) -> Result<(StatusCode, Json<AddReactionResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AddReactionResponse = add_reaction(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for DELETE `/reactions/{id}`.
async fn handle_remove_reaction(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(reaction_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    remove_reaction(&mut persistence, &actor, reaction_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/reactions/event/{id}`.
async fn handle_list_reactions(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<ListReactionsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListReactionsResponse = list_reactions(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/analytics/summary`. Requires AGENT or ADMIN.
async fn handle_analytics_summary(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<AnalyticsSummaryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AnalyticsSummaryResponse =
        analytics_summary(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/analytics/by-category`. Requires AGENT or ADMIN.
async fn handle_analytics_by_category(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<AnalyticsByCategoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AnalyticsByCategoryResponse =
        analytics_by_category(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/analytics/utilization`. Requires AGENT or ADMIN.
async fn handle_analytics_utilization(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<AnalyticsUtilizationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AnalyticsUtilizationResponse =
        analytics_utilization(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/auth/register", post(handle_signup))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route("/events/search", get(handle_search_events))
        .route("/events", post(handle_create_event))
        .route(
            "/events/{id}",
            get(handle_get_event).patch(handle_update_event),
        )
        .route("/events/{id}/publish", post(handle_publish_event))
        .route("/registrations", post(handle_create_registration))
        .route("/registrations/me", get(handle_list_my_registrations))
        .route(
            "/registrations/event/{id}",
            get(handle_list_event_registrations),
        )
        .route("/registrations/{id}", delete(handle_cancel_registration))
        .route("/reactions", post(handle_add_reaction))
        .route("/reactions/event/{id}", get(handle_list_reactions))
        .route("/reactions/{id}", delete(handle_remove_reaction))
        .route("/analytics/summary", get(handle_analytics_summary))
        .route("/analytics/by-category", get(handle_analytics_by_category))
        .route("/analytics/utilization", get(handle_analytics_utilization))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Creates the bootstrap admin account if no account exists for the email.
fn seed_admin(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if persistence.get_user_by_email(email)?.is_some() {
        info!(email = %email, "Admin account already exists, skipping bootstrap");
        return Ok(());
    }

    let user_id: i64 = persistence.create_user("admin", email, password, Role::Admin)?;
    info!(user_id = user_id, email = %email, "Created bootstrap admin account");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing EventHub Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password) {
        seed_admin(&mut persistence, email, password)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: LiveEventBroadcaster::new(),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
