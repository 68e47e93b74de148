//! Store en memoria
//!
//! Implementación de `CompanyStore` sin base de datos, para desarrollo
//! local y tests. La verificación de unicidad y la escritura ocurren bajo
//! el mismo write lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::CompanyStore;
use crate::models::company::{Company, CompanyPayload};
use crate::utils::errors::{conflict_error, AppResult};

#[derive(Default)]
struct Inner {
    next_id: i32,
    by_id: HashMap<i32, Company>,
    // cr_number -> id, hace las veces del índice único
    by_cr: HashMap<String, i32>,
}

#[derive(Clone, Default)]
pub struct InMemoryCompanyRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl CompanyStore for InMemoryCompanyRepository {
    async fn find_by_cr(&self, cr_number: &str) -> AppResult<Option<Company>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_cr
            .get(cr_number)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn exists_by_cr(&self, cr_number: &str) -> AppResult<bool> {
        Ok(self.inner.read().await.by_cr.contains_key(cr_number))
    }

    async fn insert(&self, payload: &CompanyPayload) -> AppResult<Company> {
        let mut inner = self.inner.write().await;

        if inner.by_cr.contains_key(&payload.cr_number) {
            return Err(conflict_error(&payload.cr_number));
        }

        inner.next_id += 1;
        let company = Company::new(inner.next_id, payload, Utc::now());

        inner.by_cr.insert(company.cr_number.clone(), company.id);
        inner.by_id.insert(company.id, company.clone());

        Ok(company)
    }

    async fn update(&self, id: i32, payload: &CompanyPayload) -> AppResult<Option<Company>> {
        let mut inner = self.inner.write().await;

        let previous_cr = match inner.by_id.get(&id) {
            Some(company) => company.cr_number.clone(),
            None => return Ok(None),
        };

        if let Some(owner) = inner.by_cr.get(&payload.cr_number) {
            if *owner != id {
                return Err(conflict_error(&payload.cr_number));
            }
        }

        if previous_cr != payload.cr_number {
            inner.by_cr.remove(&previous_cr);
            inner.by_cr.insert(payload.cr_number.clone(), id);
        }

        let company = match inner.by_id.get_mut(&id) {
            Some(company) => company,
            None => return Ok(None),
        };
        company.apply(payload, Utc::now());

        Ok(Some(company.clone()))
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Company>> {
        let inner = self.inner.read().await;

        let mut companies: Vec<&Company> = inner.by_id.values().collect();
        companies.sort_by(|a, b| {
            a.company_name_en
                .cmp(&b.company_name_en)
                .then(a.id.cmp(&b.id))
        });

        Ok(companies
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
