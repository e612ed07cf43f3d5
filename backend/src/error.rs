use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid team")]
    InvalidTeam,
    #[error("malformed request body")]
    MalformedBody,
    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),
    #[error("publish error: {0}")]
    Publish(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Publish(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Publish(e.to_string())
    }
}

impl AppError {
    fn status(&self) -> Status {
        match self {
            AppError::InvalidTeam => Status::BadRequest,
            // An unreadable body is part of the generic catch-all, not the
            // closed-set rejection.
            AppError::MalformedBody | AppError::Store(_) | AppError::Publish(_) => {
                Status::InternalServerError
            }
        }
    }

    /// Caller-facing message. Upstream details stay in the logs.
    fn message(&self) -> &'static str {
        match self {
            AppError::InvalidTeam => "Invalid team",
            AppError::MalformedBody | AppError::Store(_) | AppError::Publish(_) => "Server error",
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for AppError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.message()));

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
