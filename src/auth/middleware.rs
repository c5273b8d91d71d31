//! Axum middleware entry points for the authentication pipeline.
//!
//! Two wrappers around [`Authenticator::authenticate`] that differ only in
//! failure policy:
//!
//! - [`require_auth`] rejects the request with a status/message pair
//! - [`optional_auth`] proceeds unauthenticated on any failure
//!
//! On success both insert [`CurrentUser`] into the request extensions and
//! hand control to the inner service without writing anything themselves.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{debug, warn};

use crate::api::AppState;
use crate::auth::authenticator::AuthError;
use crate::db::schema::UserRecord;

/// Authenticated user attached to the request extensions.
///
/// Handlers behind [`require_auth`] may extract `Extension<CurrentUser>`
/// unconditionally; handlers behind [`optional_auth`] must use
/// `Option<Extension<CurrentUser>>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// Mandatory authentication middleware.
///
/// Either attaches a validated identity and passes control onward, or
/// short-circuits with a rejection response. Never both.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let outcome = state.authenticate(bearer_header(&req)).await;

    match outcome {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(err) => {
            warn!(error = ?err, "rejecting unauthenticated request");
            reject(&err)
        }
    }
}

/// Best-effort authentication middleware.
///
/// Attaches an identity when the full pipeline succeeds; every failure
/// class collapses to "proceed without one". No status code ever originates
/// here.
pub async fn optional_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let outcome = state.authenticate(bearer_header(&req)).await;

    match outcome {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
        }
        Err(err) => {
            debug!(error = ?err, "proceeding unauthenticated");
        }
    }

    next.run(req).await
}

fn bearer_header(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Convert a classified failure into its terminal response.
fn reject(err: &AuthError) -> Response {
    let status = match err {
        AuthError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNAUTHORIZED,
    };

    let body = json!({
        "success": false,
        "message": err.to_string(),
    });

    (status, Json(body)).into_response()
}
