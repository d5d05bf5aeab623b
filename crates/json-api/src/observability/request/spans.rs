//! Route-shaped span names.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

/// Span name and metric label for a request, with record ids collapsed to
/// `{id}` so every registration or course shares one series.
pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
