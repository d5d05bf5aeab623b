//! W3C `traceparent` extraction for inbound requests.

use opentelemetry::{
    Context,
    propagation::{Extractor, TextMapPropagator as _},
    trace::TraceContextExt as _,
};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use salvo::http::{HeaderMap, HeaderName};

/// Remote parent for the request span, when the caller sent a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    // Fresh base context: a request without trace headers must not inherit
    // whatever span happens to be active.
    let context = TraceContextPropagator::new()
        .extract_with_context(&Context::new(), &HeaderExtractor(headers));

    context
        .span()
        .span_context()
        .is_valid()
        .then_some(context)
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::HeaderValue;

    use super::*;

    #[test]
    fn valid_traceparent_becomes_parent() {
        let mut headers = HeaderMap::new();

        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        let context = extract_parent_context(&headers);

        assert!(context.is_some(), "expected a remote parent");
        assert_eq!(
            context
                .map(|context| context.span().span_context().trace_id().to_string())
                .as_deref(),
            Some("4bf92f3577b34da6a3ce929d0e0e4736"),
            "trace id carried over"
        );
    }

    #[test]
    fn absent_or_malformed_traceparent_is_ignored() {
        let mut headers = HeaderMap::new();

        assert!(extract_parent_context(&headers).is_none(), "no header");

        headers.insert("traceparent", HeaderValue::from_static("not-a-trace"));

        assert!(extract_parent_context(&headers).is_none(), "malformed header");
    }
}
