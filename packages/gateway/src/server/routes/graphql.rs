use crate::server::graphql::{GraphQLContext, Schema};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use juniper::http::{GraphQLBatchRequest, GraphQLRequest};
use std::sync::Arc;
use tracing::error;

/// GraphQL POST endpoint
pub async fn graphql_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    jar: CookieJar,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    let response = request.execute(&schema, &context).await;
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    let jar = with_session_cookie(jar, &context).await;
    (status, jar, Json(response)).into_response()
}

/// GraphQL batch POST endpoint
pub async fn graphql_batch_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    jar: CookieJar,
    Json(batch): Json<GraphQLBatchRequest>,
) -> Response {
    let response = batch.execute(&schema, &context).await;
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    let jar = with_session_cookie(jar, &context).await;
    (status, jar, Json(response)).into_response()
}

/// Apply the cookie change a resolver staged, if any
async fn with_session_cookie(jar: CookieJar, context: &GraphQLContext) -> CookieJar {
    let Some(cookie) = context.take_session_cookie().await else {
        return jar;
    };

    match cookie.apply(jar.clone()) {
        Ok(jar) => jar,
        Err(e) => {
            error!(error = %e, "Failed to set session cookie");
            jar
        }
    }
}

/// GraphQL playground (GraphiQL)
pub async fn graphql_playground() -> Html<String> {
    Html(juniper::http::graphiql::graphiql_source("/graphql", None))
}
