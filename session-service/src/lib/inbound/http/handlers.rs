use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::middleware::BearerTokenError;
use crate::session::errors::SessionError;
use crate::user::errors::UserError;

pub mod create_user;
pub mod get_current_user;
pub mod login;
pub mod refresh;
pub mod revoke;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections use the API envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// 500 whose detail goes to the log only.
    fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed with internal error");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Well-formed JSON of the wrong shape stays 422; everything else is a bad request.
        match rejection {
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity(rejection.body_text())
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::HashingFailure(_) | UserError::Store(_) => ApiError::internal(err),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials
            | SessionError::InvalidRefreshToken(_)
            | SessionError::TokenNotFound => ApiError::Unauthorized(err.to_string()),
            SessionError::HashingFailure(_)
            | SessionError::AccessToken(_)
            | SessionError::StoreFailure(_) => ApiError::internal(err),
        }
    }
}

impl From<BearerTokenError> for ApiError {
    fn from(err: BearerTokenError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::AccessTokenError;

    use super::*;
    use crate::domain::errors::StoreError;
    use crate::session::errors::RefreshTokenError;

    #[test]
    fn test_session_errors_map_to_unauthorized() {
        assert_eq!(
            ApiError::from(SessionError::InvalidCredentials),
            ApiError::Unauthorized("Incorrect username or password".to_string())
        );
        assert!(matches!(
            ApiError::from(SessionError::InvalidRefreshToken(RefreshTokenError::Expired)),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(SessionError::TokenNotFound),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_internal_failures_hide_detail() {
        let store = ApiError::from(SessionError::StoreFailure(
            "password authentication failed for user postgres".to_string(),
        ));
        let token = ApiError::from(SessionError::AccessToken(
            AccessTokenError::EncodingFailed("bad key".to_string()),
        ));
        let user = ApiError::from(UserError::Store(StoreError::Database(
            "relation users does not exist".to_string(),
        )));

        for err in [store, token, user] {
            assert_eq!(
                err,
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            );
        }
    }

    #[test]
    fn test_user_errors() {
        assert!(matches!(
            ApiError::from(UserError::UsernameAlreadyExists("alice".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFound("id".to_string())),
            ApiError::NotFound(_)
        ));
        assert_eq!(
            ApiError::from(UserError::HashingFailure("out of memory".to_string())),
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_bearer_errors_are_bad_requests() {
        assert!(matches!(
            ApiError::from(BearerTokenError::Missing),
            ApiError::BadRequest(_)
        ));
    }
}
