//! Security headers middleware
//!
//! Adds a fixed set of security headers to every HTTP response:
//! - X-Content-Type-Options: nosniff - Prevents MIME type sniffing
//! - X-Frame-Options: DENY - Prevents clickjacking
//! - Strict-Transport-Security: HSTS header for HTTPS enforcement
//! - Content-Security-Policy: Restricts resource loading to same origin
//! - Referrer-Policy: Controls referrer information

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Security headers middleware
///
/// Applied to the whole router, so the headers land on error responses and
/// the Swagger UI as well as the JSON API.
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // One year, including subdomains
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
    );

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
