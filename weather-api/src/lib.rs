//! REST front-end for the weather service.
//!
//! Exposes city and coordinate lookups plus a health check under `/api/v1`, with request
//! tracing, permissive CORS, panic recovery and a request deadline applied to every
//! route.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
