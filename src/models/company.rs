//! Modelo de Company
//!
//! Este módulo contiene el struct Company y el payload de negocio
//! usado por el protocolo de upsert. Mapea exactamente al schema PostgreSQL
//! con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Clasificaciones conocidas por el cliente; el store no las impone
pub const CLASSIFICATION_LESS_THAN_3M: &str = "Less than 3 million SAR";
pub const CLASSIFICATION_MORE_THAN_3M: &str = "More than 3 million SAR";
pub const CLASSIFICATION_LESS_THAN_3M_AR: &str = "أقل من 3 ملايين ريال";
pub const CLASSIFICATION_MORE_THAN_3M_AR: &str = "اكثر من 3 ملايين ريال";

pub const KNOWN_CLASSIFICATIONS: [&str; 4] = [
    CLASSIFICATION_LESS_THAN_3M,
    CLASSIFICATION_MORE_THAN_3M,
    CLASSIFICATION_LESS_THAN_3M_AR,
    CLASSIFICATION_MORE_THAN_3M_AR,
];

/// Company principal - mapea exactamente a la tabla companies
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Company {
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

/// Campos de negocio de una company. Nunca incluye id ni timestamps:
/// esos los asigna exclusivamente el store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyPayload {
    pub cr_number: String,
    pub company_name_en: String,
    pub company_name_ar: String,
    pub phone_number: String,
    pub license_start_date: NaiveDate,
    pub classification: String,
}

impl Company {
    /// Construir un registro nuevo a partir del payload
    pub fn new(id: i32, payload: &CompanyPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            cr_number: payload.cr_number.clone(),
            company_name_en: payload.company_name_en.clone(),
            company_name_ar: payload.company_name_ar.clone(),
            phone_number: payload.phone_number.clone(),
            license_start_date: payload.license_start_date,
            classification: payload.classification.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sobrescribir todos los campos de negocio y refrescar updated_at
    pub fn apply(&mut self, payload: &CompanyPayload, now: DateTime<Utc>) {
        self.cr_number = payload.cr_number.clone();
        self.company_name_en = payload.company_name_en.clone();
        self.company_name_ar = payload.company_name_ar.clone();
        self.phone_number = payload.phone_number.clone();
        self.license_start_date = payload.license_start_date;
        self.classification = payload.classification.clone();
        self.updated_at = now;
    }

    /// Verificar que los campos de negocio coinciden con el payload
    #[cfg(test)]
    pub fn matches(&self, payload: &CompanyPayload) -> bool {
        self.cr_number == payload.cr_number
            && self.company_name_en == payload.company_name_en
            && self.company_name_ar == payload.company_name_ar
            && self.phone_number == payload.phone_number
            && self.license_start_date == payload.license_start_date
            && self.classification == payload.classification
    }
}

/// Resultado del protocolo de upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Registro persistido junto con la rama que tomó el upsert
#[derive(Debug, Clone)]
pub struct SavedCompany {
    pub company: Company,
    pub outcome: SaveOutcome,
}
