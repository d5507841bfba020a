//! Notes service routes

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, Method, StatusCode, header, request::Parts},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use auth::Credentials;

use crate::{
    config::ServerConfig,
    error::{ApiError, ApiResult},
    middleware::{RequestIdentity, auth_middleware},
    models::{LoginResponse, NewNote, NoteId, NoteRequest, NoteResponse, UserResponse},
    state::AppState,
};

/// Create the router for the notes service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/notes", post(create_note).get(list_notes))
        .route("/notes/:id", get(get_note).delete(delete_note))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap the router with the CORS policy and request timeout from `config`
pub fn with_http_layers(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors_layer(&config.allowed_origins))
}

fn origin_allowed(patterns: &[String], origin: &str) -> bool {
    patterns.iter().any(|pattern| match pattern.strip_suffix(":*") {
        Some(base) => origin
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix(':'))
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
        None => pattern == origin,
    })
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let patterns = allowed_origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| origin_allowed(&patterns, origin))
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "notekeep"
    }))
}

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> ApiResult<Credentials> {
    payload
        .map(|Json(credentials)| credentials)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let credentials = credentials(payload)?;

    let id = state
        .auth
        .register(&credentials.email, &credentials.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id,
            email: credentials.email,
        }),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let credentials = credentials(payload)?;

    let token = state
        .auth
        .login(&credentials.email, &credentials.password)
        .await?;

    Ok(Json(LoginResponse {
        email: credentials.email,
        token,
    }))
}

fn parse_note_id(raw: &str) -> ApiResult<NoteId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("invalid id format".to_string()))
}

/// Create a note owned by the caller
pub async fn create_note(
    State(state): State<AppState>,
    identity: RequestIdentity,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if request.content.is_empty() {
        return Err(ApiError::BadRequest("content is required".to_string()));
    }

    let note = state
        .notes
        .create(
            &identity,
            NewNote {
                title: request.title,
                content: request.content,
            },
        )
        .await?;

    info!(note_id = note.id, user_id = identity.user_id(), "Note created");
    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

/// Get one of the caller's notes
pub async fn get_note(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_note_id(&id)?;
    let note = state.notes.get(&identity, id).await?;

    Ok(Json(NoteResponse::from(note)))
}

/// Delete one of the caller's notes, returning it
pub async fn delete_note(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_note_id(&id)?;
    let note = state.notes.delete(&identity, id).await?;

    info!(note_id = id, user_id = identity.user_id(), "Note deleted");
    Ok(Json(NoteResponse::from(note)))
}

/// List the caller's notes
pub async fn list_notes(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> ApiResult<impl IntoResponse> {
    let notes = state.notes.list(&identity).await?;
    let notes: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();

    Ok(Json(notes))
}
