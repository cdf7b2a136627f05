use thiserror::Error;

use shared_models::error::AppError;

use crate::models::{DoctorId, TokenId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpdError {
    #[error("Unknown doctor: {doctor_id}")]
    UnknownResource { doctor_id: DoctorId },

    #[error("Unknown token: {token}")]
    UnknownToken { token: TokenId },

    #[error("Token {token} is already marked as consulted")]
    AlreadyConsulted { token: TokenId },

    #[error("Invalid {field}: {value}")]
    InvalidInput { field: &'static str, value: String },
}

impl OpdError {
    pub fn invalid_input(field: &'static str, value: impl Into<String>) -> Self {
        OpdError::InvalidInput {
            field,
            value: value.into(),
        }
    }
}

impl From<OpdError> for AppError {
    fn from(err: OpdError) -> Self {
        match err {
            OpdError::UnknownResource { .. } | OpdError::UnknownToken { .. } => {
                AppError::NotFound(err.to_string())
            }
            OpdError::AlreadyConsulted { .. } => AppError::Conflict(err.to_string()),
            OpdError::InvalidInput { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}
