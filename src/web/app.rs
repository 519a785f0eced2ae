//! Main entrypoint for the web application

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tower_http::{
    compression::CompressionLayer,
    trace::{
        DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
    },
    LatencyUnit,
};
use tracing::{info, Level};

use crate::config::Settings;
use crate::content::ContentStore;
use crate::models::FeedBuilder;
use crate::web::handlers::{feed_route, fixed_language, AppState};

/// One feed endpoint per configured route, all reading from `store`.
pub fn build_app(settings: &Settings, store: Arc<dyn ContentStore>) -> Router {
    let state = AppState {
        store,
        builder: Arc::new(FeedBuilder::new(settings.feed.clone())),
        default_locale: settings.default_locale.clone(),
    };

    let mut router = Router::new();
    for route in &settings.routes {
        info!("Feed {} serves language \"{}\"", route.path, route.language);
        router = router.route(
            &route.path,
            feed_route(fixed_language(route.language.to_string())),
        );
    }

    router
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http-request",
                        method = request.method().as_str(),
                        uri = request.uri().path(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .layer(CompressionLayer::new())
}
