//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::CompanyStore;
use crate::services::company_service::CompanyService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub companies: CompanyService,
}

impl AppState {
    pub fn new(store: Arc<dyn CompanyStore>, config: EnvironmentConfig) -> Self {
        Self {
            config,
            companies: CompanyService::new(store),
        }
    }
}
