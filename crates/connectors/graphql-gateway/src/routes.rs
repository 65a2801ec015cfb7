//! The HTTP surface of the gateway.

use axum::extract::{Json, RawQuery, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::health;
use crate::state::ServerState;

/// Where `/playground` sends the browser: Apollo Sandbox, pointed at this server.
pub fn playground_url(port: u16) -> String {
    format!("https://studio.apollographql.com/sandbox/explorer?endpoint=http://localhost:{port}/graphql")
}

pub fn create_router(state: ServerState, port: u16) -> Router {
    let playground = playground_url(port);

    Router::new()
        .route("/graphql", get(get_graphql).post(post_graphql))
        .route(
            "/playground",
            get(move || async move { Redirect::temporary(&playground) }),
        )
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(state)
}

async fn post_graphql(
    State(state): State<ServerState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request).await)
}

async fn get_graphql(State(state): State<ServerState>, RawQuery(query): RawQuery) -> Response {
    let Some(query) = query else {
        return (StatusCode::BAD_REQUEST, "missing query string").into_response();
    };
    match async_graphql::http::parse_query_string(&query) {
        Ok(request) if request.query.trim().is_empty() => {
            (StatusCode::BAD_REQUEST, "missing query parameter").into_response()
        }
        Ok(request) => Json(state.schema.execute(request).await).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

async fn get_health(State(state): State<ServerState>) -> StatusCode {
    match health::health_check(state.storage.as_ref()).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::error!("{}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn get_metrics(State(state): State<ServerState>) -> Result<String, (StatusCode, String)> {
    state.storage.report_metrics(&state.metrics);
    prometheus::TextEncoder::new()
        .encode_to_string(&state.metrics_registry.gather())
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
}
