use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ! Admin gate
    #[error("unauthorized")]
    Unauthorized,

    // ! Invite codes
    #[error("invalid invite code")]
    InvalidCode,
    #[error("invite code already used")]
    CodeUsed,

    // ! Merchant validation
    #[error("invalid merchant id (3-20 characters: letters, digits, hyphen, underscore)")]
    InvalidMerchantId,
    #[error("merchant id already taken")]
    MerchantIdTaken,
    #[error("{0} is not a valid url")]
    InvalidUrl(&'static str),
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid request body: {0}")]
    AxumJsonRejection(#[from] JsonRejection),

    // ! Merchant self-service
    #[error("verification failed")]
    Forbidden,
    #[error("merchant not found")]
    MerchantNotFound,

    // ! Internal
    #[error("Store Error: {0}")]
    Store(#[from] StoreError),
    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config Error: {0}")]
    Config(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            Error::MerchantNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::InvalidCode
            | Error::CodeUsed
            | Error::InvalidMerchantId
            | Error::MerchantIdTaken
            | Error::InvalidUrl(_)
            | Error::MissingField(_)
            | Error::AxumJsonRejection(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Store(error) => {
                error!("Store Error: {:#?}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
            Error::Serialization(error) => {
                error!("Serialization Error: {:#?}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
            Error::Io(error) => {
                error!("Io Error: {:#?}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
            Error::Config(error) => {
                error!("Config Error: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
        };
        (
            status,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}
