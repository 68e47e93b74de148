//! Servicio de companies
//!
//! Protocolo de upsert (crear o actualizar por número CR) y fachada de
//! consultas sobre el store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::company::{Company, CompanyPayload, SaveOutcome, SavedCompany};
use crate::repositories::CompanyStore;
use crate::utils::errors::{conflict_error, AppError, AppResult};

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn CompanyStore>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self { store }
    }

    /// Crear si no existe, actualizar si existe. La clave es el número CR.
    pub async fn save(&self, payload: CompanyPayload) -> AppResult<SavedCompany> {
        info!("💾 Guardando company con CR: {}", payload.cr_number);

        match self.store.find_by_cr(&payload.cr_number).await? {
            Some(existing) => {
                let company = self.update(existing.id, &payload).await?;
                info!("✅ Company actualizada con CR: {} (id {})", company.cr_number, company.id);
                Ok(SavedCompany {
                    company,
                    outcome: SaveOutcome::Updated,
                })
            }
            None => {
                let company = self.create(&payload).await?;
                info!("✅ Company creada con CR: {} (id {})", company.cr_number, company.id);
                Ok(SavedCompany {
                    company,
                    outcome: SaveOutcome::Created,
                })
            }
        }
    }

    /// Insertar una company nueva. Si otro request ganó la carrera y ya
    /// insertó el mismo CR, el store responde Conflict.
    pub async fn create(&self, payload: &CompanyPayload) -> AppResult<Company> {
        if self.store.exists_by_cr(&payload.cr_number).await? {
            warn!("⚠️ Ya existe una company con CR: {}", payload.cr_number);
            return Err(conflict_error(&payload.cr_number));
        }

        self.store.insert(payload).await
    }

    /// Sobrescribir todos los campos de negocio de la company `id`
    pub async fn update(&self, id: i32, payload: &CompanyPayload) -> AppResult<Company> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))?;

        if current.cr_number != payload.cr_number {
            if let Some(other) = self.store.find_by_cr(&payload.cr_number).await? {
                if other.id != id {
                    warn!(
                        "⚠️ No se puede actualizar company {}: CR {} pertenece a company {}",
                        id, payload.cr_number, other.id
                    );
                    return Err(conflict_error(&payload.cr_number));
                }
            }
        }

        self.store
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))
    }

    pub async fn find_by_cr(&self, cr_number: &str) -> AppResult<Option<Company>> {
        info!("🔍 Buscando company con CR: {}", cr_number);
        self.store.find_by_cr(cr_number).await
    }

    pub async fn exists(&self, cr_number: &str) -> AppResult<bool> {
        let exists = self.store.exists_by_cr(cr_number).await?;
        info!("🔍 Existe company con CR {}: {}", cr_number, exists);
        Ok(exists)
    }

    /// Página `page_number` (base 1) ordenada por nombre en inglés
    pub async fn list(&self, page_number: u32, page_size: u32) -> AppResult<Vec<Company>> {
        let offset = (i64::from(page_number) - 1).max(0) * i64::from(page_size);
        let companies = self.store.list(offset, i64::from(page_size)).await?;
        info!(
            "📋 {} companies recuperadas (página {}, tamaño {})",
            companies.len(),
            page_number,
            page_size
        );
        Ok(companies)
    }
}
