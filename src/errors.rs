use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::profiles::DirectoryError;
use crate::services::store::StoreError;

/// API-level error taxonomy.
///
/// The match-creation race is resolved inside the store and never appears
/// here; both racing callers get a successful response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot swipe on yourself")]
    CannotSwipeSelf,

    #[error("swipe already recorded for this user pair")]
    AlreadySwiped,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("unexpected persistence failure")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::CannotSwipeSelf => "CANNOT_SWIPE_SELF",
            ApiError::AlreadySwiped => "ALREADY_SWIPED",
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CannotSwipeSelf | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::AlreadySwiped => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status()).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: self.status().as_u16(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSwipe { .. } => ApiError::AlreadySwiped,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::CannotSwipeSelf.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AlreadySwiped.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::NotFound("profile not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Forbidden("blocked".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::CannotSwipeSelf.code(), "CANNOT_SWIPE_SELF");
        assert_eq!(ApiError::AlreadySwiped.code(), "ALREADY_SWIPED");
        assert_eq!(ApiError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(ApiError::Forbidden("x".into()).code(), "FORBIDDEN");
    }

    #[test]
    fn test_duplicate_swipe_maps_to_conflict() {
        let err: ApiError = StoreError::DuplicateSwipe {
            from_user_id: "u1".into(),
            to_user_id: "u2".into(),
        }
        .into();

        assert!(matches!(err, ApiError::AlreadySwiped));
    }
}
