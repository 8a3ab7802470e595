//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domains::auth::session_token;
use crate::kernel::ServerDeps;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::routes::{
    graphql_batch_handler, graphql_handler, graphql_playground, health_handler,
};

/// Middleware to create GraphQLContext per-request
///
/// Captures the raw session cookie; validation happens per field in the
/// access gate, so public fields work without a session.
async fn create_graphql_context(
    Extension(deps): Extension<Arc<ServerDeps>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let context = GraphQLContext::new(deps, session_token(&jar));

    request.extensions_mut().insert(context);

    next.run(request).await
}

/// CORS for the configured origins; credentials (the session cookie) are only
/// allowed with an explicit origin list
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>, allowed_origins: &[String]) -> Router {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    let mut router = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    router
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(Extension(deps))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        // State (schema for GraphQL handlers)
        .with_state(schema)
}
