//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y aplica las migraciones
//! embebidas en el binario.

use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Conexión a la base de datos con migraciones aplicadas
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool y ejecutar las migraciones pendientes
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        info!("🔗 Conectando a PostgreSQL: {}", config.masked_url());
        let pool = config.create_pool().await?;

        run_migrations(&pool).await?;
        info!("✅ Base de datos lista");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("📦 Aplicando migraciones");
    sqlx::migrate!("./migrations").run(pool).await
}
