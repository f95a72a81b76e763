use actix_web::{http::StatusCode, HttpResponse};
use promptbot_api_structs::dtos::CommandResponse;
use thiserror::Error;

/// Every failure still answers the command with exactly one reply, the
/// variant only decides the status code it is sent with
#[derive(Error, Debug)]
pub enum BotError {
    /// Something went wrong on our end, the message is an apology
    #[error("{0}")]
    InternalError(String),
    #[error("{0}")]
    BadClientData(String),
    /// Nothing matched the request. This is an answer, not a failure.
    #[error("{0}")]
    NotFound(String),
    #[error("I haven't been set up to allow {0}, please moan at whoever set me up")]
    Unavailable(String),
}

impl actix_web::error::ResponseError for BotError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(CommandResponse::new(self.to_string()))
    }
}
