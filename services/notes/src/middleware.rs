//! Authentication middleware for bearer token validation

use auth::UserId;
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::{debug, warn};

use crate::{error::ApiError, state::AppState};

/// Identity of the caller, resolved from a verified token
///
/// Lives for a single request only. It can only be produced by
/// [`auth_middleware`], so holding one proves the token was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIdentity {
    user_id: UserId,
}

impl RequestIdentity {
    pub(crate) fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Id of the authenticated user
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<Authorization<Bearer>> {
    headers.typed_get::<Authorization<Bearer>>()
}

/// Verify the `Authorization: Bearer <token>` header and attach the caller's identity
///
/// Requests without a valid token are answered with 401 and never reach
/// the wrapped handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(header) = bearer_token(req.headers()) else {
        debug!("Missing or malformed Authorization header");
        return Err(ApiError::Unauthenticated);
    };

    let user_id = state.tokens.verify(header.token()).map_err(|e| {
        warn!(reason = %e, "Rejected bearer token");
        ApiError::Unauthenticated
    })?;

    req.extensions_mut().insert(RequestIdentity::new(user_id));

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .copied()
            .ok_or(ApiError::Unauthenticated)
    }
}
