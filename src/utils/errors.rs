//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la aplicación y su conversión
//! al sobre de error JSON que reciben los clientes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

/// Mensaje genérico para fallos no clasificados
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}: {}", .errors.join(", "))]
    Validation { message: String, errors: Vec<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error de validación con un único mensaje, que también se usa como resumen
    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        AppError::Validation {
            errors: vec![message.clone()],
            message,
        }
    }

    /// Error de validación con resumen genérico y lista de mensajes
    pub fn invalid_input(errors: Vec<String>) -> Self {
        AppError::Validation {
            message: "Invalid input data".to_string(),
            errors,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::invalid_input(validation_messages(&errors))
    }
}

/// Aplanar los errores de `validator` en mensajes legibles, ordenados por campo
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

/// Sobre de error devuelto por la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: String, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message,
            errors,
            status_code: status.as_u16(),
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, errors) = match self {
            AppError::Validation { message, errors } => {
                warn!("⚠️ Validación fallida: {}", errors.join(", "));
                (message, errors)
            }

            AppError::NotFound(msg) => {
                info!("🔍 Recurso no encontrado: {}", msg);
                (msg, Vec::new())
            }

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflicto: {}", msg);
                (msg, Vec::new())
            }

            AppError::Database(e) => {
                error!("❌ Error de base de datos: {}", e);
                (INTERNAL_ERROR_MESSAGE.to_string(), Vec::new())
            }

            AppError::Internal(msg) => {
                error!("❌ Error interno: {}", msg);
                (INTERNAL_ERROR_MESSAGE.to_string(), Vec::new())
            }
        };

        (status, Json(ApiErrorResponse::new(status, message, errors))).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(cr_number: &str) -> AppError {
    AppError::NotFound(format!("Company with CR Number {} not found", cr_number))
}

/// Función helper para crear errores de conflicto por CR duplicado
pub fn conflict_error(cr_number: &str) -> AppError {
    AppError::Conflict(format!(
        "CR number {} already in use by another record",
        cr_number
    ))
}
