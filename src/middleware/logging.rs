//! Request logging middleware
//!
//! Every request runs inside an `http_request` span carrying a generated
//! request id, so the service and repository logs it produces can be
//! correlated. Completed responses are logged at INFO with their latency.

use axum::{body::Body, http::Request};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};
use uuid::Uuid;

/// Span factory tagging each request with a fresh id
#[derive(Debug, Clone, Default)]
pub struct RequestSpan;

impl MakeSpan<Body> for RequestSpan {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        tracing::info_span!(
            "http_request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

pub type RequestTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan, (), DefaultOnResponse>;

/// Tracing layer used by the router
pub fn trace_layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(())
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_span_is_created() {
        let request = Request::builder()
            .uri("/api/events/1")
            .body(Body::empty())
            .unwrap();

        let span = RequestSpan.make_span(&request);
        // No subscriber is installed in unit tests, so the span is disabled
        assert!(span.is_disabled() || span.metadata().is_some());
    }
}
