//! Authentication endpoints.
//!
//! ```text
//! POST /api/v1/login {"email":"test@gmail.com","password":"password123"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedSession, Error, LoginCredentials, LoginValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthenticatedUser, PresentedToken};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login email; surrounding whitespace and case are ignored.
    #[schema(example = "test@gmail.com")]
    pub email: String,
    /// Account password.
    #[schema(example = "password123")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent requests.
    #[schema(example = "q3Zk2q6xW0b8YtV9pC1nF4hJ7mL5sR2dA0eG8uK6oIw")]
    pub token: String,
    /// When the token stops resolving.
    pub expires_at: DateTime<Utc>,
}

impl From<AuthenticatedSession> for LoginResponse {
    fn from(value: AuthenticatedSession) -> Self {
        Self {
            user: value.user,
            token: value.token.expose().to_owned(),
            expires_at: value.expires_at,
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::InvalidEmail => ("email", "invalid_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Exchange credentials for an access token.
///
/// The token is returned in the body and also stored in the session cookie,
/// so browser clients need not handle it.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let authenticated = state.login.login(&credentials).await?;
    session.persist_token(&authenticated.token)?;
    Ok(web::Json(authenticated.into()))
}

/// Revoke the presented token and clear the session cookie.
///
/// Succeeds even when no token, or an unknown one, is presented.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Malformed authorization header", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
    presented: PresentedToken,
) -> ApiResult<HttpResponse> {
    if let Some(token) = presented.0 {
        state.login.logout(&token).await?;
    }
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// The user owning the presented token.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or expired token", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(caller: AuthenticatedUser) -> web::Json<User> {
    web::Json(caller.user)
}
