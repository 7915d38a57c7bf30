//! HTTP route table.

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Build the application router.
///
/// All routes are public; the mobile client calls them directly, so CORS is
/// permissive. Unmatched paths and methods still answer with the JSON
/// envelope.
pub fn router(state: AppState) -> Router {
    let users_without_id = get(handlers::users::get_user_without_id)
        .put(handlers::users::update_user_without_id)
        .delete(handlers::users::delete_user_without_id);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/users", users_without_id.clone())
        .route("/users/", users_without_id)
        .route(
            "/users/{user_id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/send-confirmation-email",
            post(handlers::notifications::send_confirmation_email),
        )
        .route(
            "/send-flight-ticket",
            post(handlers::notifications::send_flight_ticket),
        )
        .fallback(handlers::fallback::not_found)
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                // Request/response spans for every call
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
