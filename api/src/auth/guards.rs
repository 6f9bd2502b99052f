use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use util::state::AppState;

use crate::auth::extractors::AdminUser;

/// Admin-only guard for route groups that are entirely admin-facing.
///
/// Runs the same Basic-credential check as the `AdminUser` extractor and
/// inserts the result into request extensions for handlers that want the
/// username.
pub async fn allow_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let (mut parts, body) = req.into_parts();
    let admin = AdminUser::from_request_parts(&mut parts, &state).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}
