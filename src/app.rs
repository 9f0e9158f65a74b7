use crate::api_docs::ApiDoc;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::state::AppState;
use axum::middleware;
use axum::{Json, Router, routing::get};
use http::header;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::MakeRequestUuid,
};
use utoipa::OpenApi;

fn cors_layer(allowed: &str) -> CorsLayer {
    let allowed_headers = [header::CONTENT_TYPE, header::ACCEPT, header::ACCEPT_LANGUAGE];
    let allowed_methods = [http::Method::GET, http::Method::POST, http::Method::OPTIONS];

    if allowed == "*" {
        // Wildcard origins cannot be combined with credentials
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(false)
    } else {
        let origins: Vec<http::HeaderValue> = allowed
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(true)
    }
}

pub fn create_app(state: AppState) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::dashboard::create_route())
        .merge(routes::teachers::create_route())
        .merge(routes::students::create_route())
        .merge(routes::classes::create_route())
        .merge(routes::subjects::create_route())
        .merge(routes::topics::create_route())
        .merge(routes::grades::create_route());

    if state.settings.openapi_enabled {
        router = router.route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    let sensitive_headers: Arc<[_]> = vec![header::COOKIE, header::SET_COOKIE].into();

    let layers = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(cors_layer(&state.settings.cors_allowed_origins))
        .propagate_x_request_id()
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    let router = router
        .layer(middleware::from_fn_with_state(state.clone(), http_logger))
        .layer(layers)
        .with_state(state);

    Ok(router)
}
