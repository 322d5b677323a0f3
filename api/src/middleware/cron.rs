use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Header App Engine sets on requests originating from the cron scheduler.
pub const CRON_HEADER: &str = "X-Appengine-Cron";

/// Authorization middleware for the trigger route.
///
/// The scheduler is the only trusted caller: anything without the exact
/// `X-Appengine-Cron: true` marker gets a plain-text 403 before any
/// orchestration work or outbound call happens. This is the only
/// authorization control on the service.
#[tracing::instrument(skip(req, next))]
pub async fn cron_auth_middleware(req: Request, next: Next) -> Response {
    let trusted = req
        .headers()
        .get(CRON_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false);

    if !trusted {
        tracing::warn!("Rejected trigger from untrusted caller");
        return (StatusCode::FORBIDDEN, "403 Forbidden").into_response();
    }

    next.run(req).await
}
