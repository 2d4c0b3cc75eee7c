use axum::http::{header, Method};
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{HttpMakeClassifier, TraceLayer};

/// A whole department instance plus a week of schedule rows stays well under
/// a megabyte; anything bigger is not a legitimate request.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Request-level middleware for every route: HTTP tracing, CORS for the
/// timetable wizard frontend, and a body cap.
pub fn stack() -> ServiceBuilder<
    Stack<CorsLayer, Stack<RequestBodyLimitLayer, Stack<TraceLayer<HttpMakeClassifier>, Identity>>>,
> {
    // The wizard is served from its own origin and only sends JSON.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
}
