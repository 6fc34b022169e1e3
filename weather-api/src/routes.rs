//! Router configuration

use axum::{
    Router,
    http::{Method, header},
    middleware::from_fn_with_state,
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::panic_response, handlers, middleware::enforce_deadline, state::AppState};

/// Build the API router with its middleware stack.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/weather/city", get(handlers::weather_by_city_missing))
        .route("/weather/city/", get(handlers::weather_by_city_missing))
        .route("/weather/city/{city}", get(handlers::weather_by_city))
        .route("/weather/coordinates", get(handlers::weather_by_coordinates))
        .route("/health", get(handlers::health))
        .method_not_allowed_fallback(handlers::method_not_allowed);

    // The last layer added is outermost: tracing sees every request, CORS sees panics
    // and timeouts already converted to envelopes.
    Router::new()
        .nest("/api/v1", api)
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), enforce_deadline))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
