//! Datos de ejemplo
//!
//! Carga dos companies de ejemplo a través del protocolo de upsert cuando
//! todavía no existen. Se activa con `SEED_SAMPLE_DATA=true`.

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::models::company::{
    CompanyPayload, CLASSIFICATION_LESS_THAN_3M_AR, CLASSIFICATION_MORE_THAN_3M_AR,
};
use crate::services::company_service::CompanyService;
use crate::utils::errors::AppResult;

pub fn sample_companies(today: NaiveDate) -> Vec<CompanyPayload> {
    vec![
        CompanyPayload {
            cr_number: "1234567890".to_string(),
            company_name_en: "Saudi Medical Insurance Company".to_string(),
            company_name_ar: "شركة التأمين الطبي السعودية".to_string(),
            phone_number: "0512345678".to_string(),
            license_start_date: today,
            classification: CLASSIFICATION_LESS_THAN_3M_AR.to_string(),
        },
        CompanyPayload {
            cr_number: "9876543210".to_string(),
            company_name_en: "Gulf Healthcare Insurance".to_string(),
            company_name_ar: "شركة الخليج للتأمين الصحي".to_string(),
            phone_number: "0598765432".to_string(),
            license_start_date: today - Duration::days(30),
            classification: CLASSIFICATION_MORE_THAN_3M_AR.to_string(),
        },
    ]
}

/// Insertar las companies de ejemplo que falten. Devuelve cuántas se crearon.
pub async fn seed_sample_data(service: &CompanyService) -> AppResult<usize> {
    let mut created = 0;

    for payload in sample_companies(Utc::now().date_naive()) {
        if service.exists(&payload.cr_number).await? {
            continue;
        }
        service.create(&payload).await?;
        created += 1;
    }

    info!("🌱 Datos de ejemplo cargados: {} companies nuevas", created);
    Ok(created)
}
