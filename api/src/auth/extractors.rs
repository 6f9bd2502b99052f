use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Basic};
use util::state::AppState;

use crate::response::ApiResponse;

/// The authenticated administrator, extracted from HTTP Basic credentials.
///
/// The username/password pair is re-checked on every request against the
/// `AdminCredential` injected into `AppState` — the gate is stateless and no
/// session or token is ever issued. Rejections carry a `WWW-Authenticate:
/// Basic` header so browser clients prompt for credentials.
///
/// # Example
/// ```rust,ignore
/// async fn admin_only_route(_admin: AdminUser) -> impl IntoResponse {
///     // Request carried valid admin credentials
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser(pub String);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| unauthorized("Missing or invalid Authorization header"))?;

        let admin = state.admin();
        if basic.username() != admin.username || basic.password() != admin.password {
            return Err(unauthorized("Incorrect username or password"));
        }

        Ok(AdminUser(basic.username().to_owned()))
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [("WWW-Authenticate", "Basic")],
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}
