use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use company_registry::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use company_registry::database::DatabaseConnection;
use company_registry::repositories::{CompanyRepository, CompanyStore, InMemoryCompanyRepository};
use company_registry::services::seed::seed_sample_data;
use company_registry::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🏥 Company Registry - API de companies aseguradoras");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;

    // Inicializar el store
    let store: Arc<dyn CompanyStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Arc::new(CompanyRepository::new(db_connection.pool().clone()))
        }
        StoreBackend::Memory => {
            info!("🧠 Usando store en memoria (los datos no se persisten)");
            Arc::new(InMemoryCompanyRepository::new())
        }
    };

    let app_state = AppState::new(store, config.clone());

    if config.seed_sample_data {
        seed_sample_data(&app_state.companies).await?;
    }

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🏢 Endpoints - Company:");
    info!("   POST /api/company/search - Buscar empresa por CR");
    info!("   POST /api/company/save - Crear o actualizar empresa");
    info!("   GET  /api/company?pageNumber=&pageSize= - Listar empresas");
    info!("   HEAD /api/company/:cr_number - Verificar existencia");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
