/// Security headers applied to every response
///
/// # Headers Applied
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: same-origin`: the feedback pages are same-origin, and
///   nothing else should learn which page the browser came from
/// - `Content-Security-Policy: default-src 'self'; frame-ancestors 'none'`
/// - `Strict-Transport-Security` (production only)
///
/// Headers are overriding: a value set by a handler is replaced.
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use intelmed_api::middleware::security::with_security_headers;
///
/// let app: Router = with_security_headers(Router::new(), true);
/// ```

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

const HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "same-origin"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self'; frame-ancestors 'none'",
    ),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Wraps `router` so every response carries the security headers
///
/// `enable_hsts` should only be set when the service is reached over HTTPS.
pub fn with_security_headers<S>(router: Router<S>, enable_hsts: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ))
    });

    if enable_hsts {
        router.layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS),
        ))
    } else {
        router
    }
}
