//! Repositorios
//!
//! Este módulo define el contrato del store de companies y sus dos
//! implementaciones: PostgreSQL y memoria.

pub mod company_repository;
pub mod memory_repository;

pub use company_repository::CompanyRepository;
pub use memory_repository::InMemoryCompanyRepository;

use crate::models::company::{Company, CompanyPayload};
use crate::utils::errors::AppResult;

/// Operaciones del store de companies.
///
/// `insert` y `update` deben respetar la unicidad de `cr_number` de forma
/// atómica: una violación detectada al escribir se devuelve como
/// `AppError::Conflict`, nunca como fila duplicada.
#[async_trait::async_trait]
pub trait CompanyStore: Send + Sync {
    /// Buscar por número CR (coincidencia exacta)
    async fn find_by_cr(&self, cr_number: &str) -> AppResult<Option<Company>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>>;

    async fn exists_by_cr(&self, cr_number: &str) -> AppResult<bool>;

    /// Insertar un registro nuevo; id y timestamps los asigna el store
    async fn insert(&self, payload: &CompanyPayload) -> AppResult<Company>;

    /// Sobrescribir los campos de negocio del registro `id`.
    /// Devuelve `None` si el registro no existe.
    async fn update(&self, id: i32, payload: &CompanyPayload) -> AppResult<Option<Company>>;

    /// Listado ordenado por nombre en inglés ascendente (desempate por id)
    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Company>>;
}
