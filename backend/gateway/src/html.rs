//! HTML responses for the view endpoint.
//!
//! Small self-contained pages; the actual stream redirect is a collaborator
//! concern. Success responses carry no-cache and frame-deny headers since
//! camera URLs are shared out-of-band.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"robots\" content=\"noindex,nofollow\">\n<title>{title}</title>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    )
}

/// 200 response for an admitted view request.
pub fn success(camera_id: &str) -> Response {
    let body = format!(
        "<h1>Camera Stream</h1>\n<p><strong>Camera ID:</strong> {camera_id}</p>\n\
         <p><strong>Status:</strong> Active</p>\n\
         <p><strong>Server Time:</strong> {}</p>",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    );
    (
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::X_FRAME_OPTIONS, "DENY"),
            (header::REFERRER_POLICY, "no-referrer"),
        ],
        Html(page(&format!("Camera View - {camera_id}"), &body)),
    )
        .into_response()
}

/// 429 response carrying the configured window so callers know when to retry.
pub fn rate_limited(window_seconds: u64) -> Response {
    let body = format!(
        "<h1>Too Many Requests</h1>\n\
         <p>This camera was already viewed within the last {window_seconds} seconds. \
         Please try again later.</p>"
    );
    (
        StatusCode::TOO_MANY_REQUESTS,
        Html(page("Too Many Requests", &body)),
    )
        .into_response()
}

/// Error page with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    let body = format!("<h1>{message}</h1>");
    (status, Html(page(message, &body))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_sets_no_store_and_frame_deny() {
        let response = success("CAM_001");
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert!(headers[header::CACHE_CONTROL]
            .to_str()
            .unwrap()
            .contains("no-store"));
    }

    #[test]
    fn rate_limited_mentions_window() {
        let response = rate_limited(60);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
