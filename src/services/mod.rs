//! Servicios de negocio
//!
//! Este módulo contiene la lógica de negocio de la aplicación.

pub mod company_service;
pub mod seed;
