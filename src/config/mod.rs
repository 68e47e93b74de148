//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos y variables de
//! entorno del sistema.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;

use thiserror::Error;

/// Errores al leer la configuración
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}
