use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Middleware that answers 404 for any path with a dot-prefixed segment
/// (`/.env`, `/.git/config`, `/%2Eenv`) before it reaches the static site.
pub async fn reject_hidden(req: Request, next: Next) -> Response {
    if is_hidden(req.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment.starts_with('.')
            || segment
                .get(..3)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("%2e"))
    })
}
