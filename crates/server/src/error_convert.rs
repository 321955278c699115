use dioxus::prelude::ServerFnError;
use reqwest::StatusCode;
use shared_types::AppError;

/// Map a failed backend response status to an AppError.
/// `service` names the backend part for the message ("auth", "data").
pub fn status_to_app_error(status: StatusCode, service: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::unauthorized("Session expired or invalid")
        }
        StatusCode::NOT_FOUND => AppError::not_found(format!("{service} resource not found")),
        s if s.is_server_error() => {
            AppError::service_unavailable(format!("{service} service returned {s}"))
        }
        s => AppError::bad_request(format!("{service} service rejected the request ({s})")),
    }
}

/// Convert a reqwest::Error into an AppError.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() || err.is_connect() {
        return AppError::service_unavailable(err.to_string());
    }
    if let Some(status) = err.status() {
        return status_to_app_error(status, "backend");
    }
    if err.is_decode() {
        return AppError::internal(format!("Unexpected backend response: {err}"));
    }
    AppError::service_unavailable(err.to_string())
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
