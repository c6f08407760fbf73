use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use subtrack_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                CoreError::Fx(_) | CoreError::MarketData(_) => StatusCode::BAD_GATEWAY,
                CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use subtrack_core::errors::ValidationError;
    use subtrack_core::fx::{Currency, FxError};
    use subtrack_market_data::errors::MarketDataError;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(CoreError::Validation(ValidationError::InvalidInput(
            "bad".into(),
        )));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(CoreError::Database(DatabaseError::NotFound("x".into())));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let upstream = ApiError::from(CoreError::Fx(FxError::RateNotFound(Currency::Usd)));
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let source = ApiError::from(CoreError::MarketData(MarketDataError::Timeout {
            provider: "CBR".into(),
        }));
        assert_eq!(source.status(), StatusCode::BAD_GATEWAY);

        let duplicate = ApiError::from(CoreError::Database(DatabaseError::UniqueViolation(
            "subscriptions.id".into(),
        )));
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let broken = ApiError::from(CoreError::Database(DatabaseError::QueryFailed("x".into())));
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
