//! Application route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, folder_routes, health_routes, note_routes, notebook_routes,
    registration_routes, user_routes,
};
use super::middleware::{auth_middleware, request_logger};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Everything here requires a bearer token
    let protected = Router::new()
        .merge(user_routes())
        .merge(folder_routes())
        .merge(note_routes())
        .merge(notebook_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public = Router::new()
        .merge(auth_routes())
        .merge(registration_routes());

    Router::new()
        .merge(health_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", public.merge(protected))
        // Global middleware
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
