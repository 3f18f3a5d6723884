//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

pub const DUPLICATE_NAME: &str = "Channel with the same name already exists";
pub const NON_POSITIVE_CLIENTS: &str = "clientsCount must be greater than 0";
pub const CHANNEL_NOT_FOUND: &str = "Channel not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("missing setting: {0}")]
    Missing(&'static str),
}

/// Per-field validation messages, kept in the order fields were checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: String) {
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_slice())
    }

    /// First message, suffixed with "(and N more error[s])" when other messages exist.
    pub fn summary(&self) -> String {
        let mut messages = self.entries.iter().flat_map(|(_, m)| m.iter());
        let Some(first) = messages.next() else {
            return String::from("The given data was invalid.");
        };
        match messages.count() {
            0 => first.clone(),
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation: {}", .0.summary())]
    Validation(FieldErrors),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidValue(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn duplicate_name() -> Self {
        AppError::Conflict(DUPLICATE_NAME.into())
    }

    pub fn non_positive_clients() -> Self {
        AppError::InvalidValue(NON_POSITIVE_CLIENTS.into())
    }

    pub fn channel_not_found() -> Self {
        AppError::NotFound(CHANNEL_NOT_FOUND.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) | AppError::InvalidValue(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ValidationBody {
    pub message: String,
    /// Field name to its messages.
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(errors) => {
                let body = ValidationBody {
                    message: errors.summary(),
                    errors,
                };
                (status, Json(body)).into_response()
            }
            AppError::Conflict(error)
            | AppError::InvalidValue(error)
            | AppError::NotFound(error)
            | AppError::BadRequest(error) => (status, Json(ErrorBody { error })).into_response(),
            AppError::Db(sqlx::Error::RowNotFound) => (
                status,
                Json(ErrorBody {
                    error: CHANNEL_NOT_FOUND.into(),
                }),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    status,
                    Json(ErrorBody {
                        error: "internal server error".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
