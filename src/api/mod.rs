// REST API endpoints guarded by the authentication middleware

use axum::{
    Extension, Router,
    middleware,
    response::Json,
    routing::get,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{Authenticator, CurrentUser, optional_auth, require_auth};

pub type AppState = Arc<Authenticator>;

pub fn create_router(state: AppState) -> Router {
    // Routes that must not be reachable without a validated identity.
    let protected = Router::new()
        .route("/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Routes that personalize when an identity is present but serve everyone.
    let tolerant = Router::new()
        .route("/greeting", get(greeting))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected)
        .merge(tolerant)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Return the identity attached by the mandatory-path middleware.
///
/// The extension is guaranteed to be present: requests without a valid
/// identity never reach this handler.
async fn current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<Value> {
    Json(serde_json::json!({
        "success": true,
        "user": user,
    }))
}

/// Personalized greeting when an identity was attached, anonymous otherwise.
async fn greeting(user: Option<Extension<CurrentUser>>) -> Json<Value> {
    let name = user.map(|Extension(CurrentUser(user))| {
        user.display_name.unwrap_or(user.email)
    });

    let message = match name {
        Some(name) => format!("Hello, {name}"),
        None => "Hello, stranger".to_string(),
    };

    Json(serde_json::json!({
        "success": true,
        "message": message,
    }))
}
