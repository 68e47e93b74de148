use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::company::{Company, CompanyPayload};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    parse_license_date, validate_license_date, validate_not_empty, validate_phone,
    CR_NUMBER_REGEX, LICENSE_DATE_MESSAGE,
};

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// Request para buscar una empresa por número CR
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearchRequest {
    #[validate(
        required(message = "CR Number is required"),
        regex(path = "CR_NUMBER_REGEX", message = "CR Number must be exactly 10 digits")
    )]
    pub cr_number: Option<String>,
}

// Request para crear o actualizar una empresa
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanySaveRequest {
    #[validate(
        required(message = "CR Number is required"),
        regex(path = "CR_NUMBER_REGEX", message = "CR Number must be exactly 10 digits")
    )]
    pub cr_number: Option<String>,

    #[validate(
        required(message = "Company name in English is required"),
        custom(function = "validate_not_empty", message = "Company name in English is required"),
        length(max = 255, message = "Company name cannot exceed 255 characters")
    )]
    pub company_name_en: Option<String>,

    #[validate(
        required(message = "Company name in Arabic is required"),
        custom(function = "validate_not_empty", message = "Company name in Arabic is required"),
        length(max = 255, message = "Company name cannot exceed 255 characters")
    )]
    pub company_name_ar: Option<String>,

    #[validate(
        required(message = "Phone number is required"),
        custom = "validate_phone"
    )]
    pub phone_number: Option<String>,

    #[validate(
        required(message = "License start date is required"),
        custom = "validate_license_date"
    )]
    pub license_start_date: Option<String>,

    #[validate(
        required(message = "Classification is required"),
        custom(function = "validate_not_empty", message = "Classification is required"),
        length(max = 100, message = "Classification cannot exceed 100 characters")
    )]
    pub classification: Option<String>,
}

impl CompanySearchRequest {
    /// Validar y extraer el número CR
    pub fn into_cr_number(self) -> AppResult<String> {
        self.validate()?;
        self.cr_number
            .ok_or_else(|| AppError::invalid("CR Number is required"))
    }
}

impl CompanySaveRequest {
    /// Validar todos los campos y convertir al payload de negocio
    pub fn into_payload(self) -> AppResult<CompanyPayload> {
        self.validate()?;

        let missing = |field: &str| AppError::invalid(format!("{} is required", field));
        let license_start_date = self
            .license_start_date
            .as_deref()
            .map(parse_license_date)
            .transpose()
            .map_err(|_| AppError::invalid(LICENSE_DATE_MESSAGE))?
            .ok_or_else(|| missing("License start date"))?;

        Ok(CompanyPayload {
            cr_number: self.cr_number.ok_or_else(|| missing("CR Number"))?,
            company_name_en: self.company_name_en.ok_or_else(|| missing("Company name in English"))?,
            company_name_ar: self.company_name_ar.ok_or_else(|| missing("Company name in Arabic"))?,
            phone_number: self.phone_number.ok_or_else(|| missing("Phone number"))?,
            license_start_date,
            classification: self.classification.ok_or_else(|| missing("Classification"))?,
        })
    }
}

// Query de paginación para el listado
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl PaginationQuery {
    pub fn page_number(&self) -> u32 {
        self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

// Response de empresa
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: i32,
    pub cr_number: String,
    pub company_name_en: String,
    pub company_name_ar: String,
    pub phone_number: String,
    pub license_start_date: NaiveDate,
    pub classification: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            cr_number: company.cr_number,
            company_name_en: company.company_name_en,
            company_name_ar: company.company_name_ar,
            phone_number: company.phone_number,
            license_start_date: company.license_start_date,
            classification: company.classification,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

// Response genérica de éxito
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::with_status(data, message, 200)
    }

    pub fn with_status(data: T, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            status_code,
            timestamp: Utc::now(),
        }
    }
}
