use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Planner(#[from] weeknight_shared::Error),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

fn rejection_kind(status: StatusCode) -> (StatusCode, &'static str) {
    match status {
        StatusCode::UNPROCESSABLE_ENTITY => (status, "validation"),
        _ if status.is_server_error() => (status, "internal"),
        _ => (status, "bad_request"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::Planner(weeknight_shared::Error::Validate(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation")
            }
            AppError::Planner(weeknight_shared::Error::User(_)) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::Planner(weeknight_shared::Error::NotFound) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            AppError::Planner(weeknight_shared::Error::Unavailable(e)) => {
                tracing::error!("Store unavailable: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
            }
            AppError::Planner(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            AppError::Json(rejection) => rejection_kind(rejection.status()),
            AppError::Path(rejection) => rejection_kind(rejection.status()),
            AppError::Query(rejection) => rejection_kind(rejection.status()),
        };

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}
