//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos en el borde HTTP.

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};

pub const CR_NUMBER_MESSAGE: &str = "CR Number must be exactly 10 digits";
pub const PHONE_NUMBER_MESSAGE: &str = "Phone number must be exactly 10 digits";
pub const LICENSE_DATE_MESSAGE: &str =
    "License start date must be a valid date (YYYY-MM-DD or ISO-8601 timestamp)";
pub const PAGINATION_MESSAGE: &str = "Invalid pagination parameters. Page number must be >= 1 and page size must be between 1 and 100";

pub const MAX_PAGE_SIZE: u32 = 100;

lazy_static! {
    pub static ref CR_NUMBER_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    pub static ref PHONE_NUMBER_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
}

/// Verificar que un número CR tenga exactamente 10 dígitos ASCII
pub fn is_valid_cr_number(value: &str) -> bool {
    CR_NUMBER_REGEX.is_match(value)
}

/// Validar el formato del número CR antes de cualquier consulta
pub fn validate_cr_number(value: &str) -> AppResult<()> {
    if is_valid_cr_number(value) {
        Ok(())
    } else {
        Err(AppError::invalid(CR_NUMBER_MESSAGE))
    }
}

/// Validar los límites de paginación
pub fn validate_pagination(page_number: u32, page_size: u32) -> AppResult<()> {
    if page_number < 1 || page_size < 1 || page_size > MAX_PAGE_SIZE {
        return Err(AppError::invalid(PAGINATION_MESSAGE));
    }
    Ok(())
}

/// Validar formato de teléfono: exactamente 10 dígitos
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_NUMBER_REGEX.is_match(value) {
        let mut error = ValidationError::new("phone");
        error.message = Some(PHONE_NUMBER_MESSAGE.into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío ni contenga solo espacios
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Convertir la fecha de licencia: acepta `YYYY-MM-DD` o un timestamp RFC 3339,
/// del que se conserva la fecha en UTC.
pub fn parse_license_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    validate_date(value)
        .or_else(|_| validate_datetime(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            let mut error = ValidationError::new("license_date");
            error.message = Some(LICENSE_DATE_MESSAGE.into());
            error.add_param("value".into(), &value.to_string());
            error
        })
}

/// Validador para `#[validate(custom)]` sobre la fecha de licencia
pub fn validate_license_date(value: &str) -> Result<(), ValidationError> {
    parse_license_date(value).map(|_| ())
}
