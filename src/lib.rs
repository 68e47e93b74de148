//! Registro de companies aseguradoras por número CR.
//!
//! API REST para buscar una company por su número de Registro Comercial
//! de 10 dígitos y crear o actualizar su perfil.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
