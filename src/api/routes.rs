//! API route configuration.

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use super::auth;
use super::handlers;
use super::sse;
use super::state::AppState;
use crate::graph::GraphApi;

/// Build routes with a generic Graph type.
///
/// This macro reduces boilerplate when registering handlers that are
/// generic over the GraphApi trait. It applies the turbofish operator
/// automatically.
macro_rules! routes {
    ($G:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$G>));
        )*
        router
    }};
}

/// Create the API router.
///
/// Every route sits behind the bearer middleware; the 404 fallback and the
/// CORS layer apply to everything. CORS is deliberately permissive — the
/// stream is consumed from browser tabs on arbitrary origins.
pub fn create_router<G: GraphApi + 'static>(state: AppState<G>) -> Router {
    let routes = routes!(G => {
        get "/events" => sse::events_handler,
        get "/api/planner/tasks" => handlers::list_tasks,
        post "/api/planner/tasks" => handlers::create_task,
        get "/api/planner/tasks/{id}" => handlers::get_task,
    });

    routes
        .route_layer(middleware::from_fn(auth::require_bearer))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
