use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use car_management::config::database::{run_migrations, DatabaseConfig};
use car_management::config::environment::{EnvironmentConfig, StorageBackend};
use car_management::create_router;
use car_management::repositories::{InMemoryStore, PgStore, Store};
use car_management::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,car_management=debug")),
        )
        .init();

    info!("🚗 Car Management API");
    info!("=====================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_environment(&config)
                .context("DATABASE_URL must be set in environment variables")?;
            let pool = db_config.create_pool().await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                anyhow::anyhow!("Error de base de datos: {}", e)
            })?;
            run_migrations(&pool).await.context("Error ejecutando migraciones")?;
            info!("✅ Base de datos conectada y migrada");
            Arc::new(PgStore::new(pool))
        }
        StorageBackend::Memory => {
            warn!("⚠️ Usando almacenamiento en memoria: los datos se pierden al reiniciar");
            Arc::new(InMemoryStore::new())
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = create_router(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /openapi.json - Documento OpenAPI");
    info!("🔐 Autenticación:");
    info!("   POST   /api/register - Registrar usuario");
    info!("   POST   /api/login - Obtener access token");
    info!("🧑 Personas (bearer token):");
    info!("   GET    /api/people - Listar personas con vehículos");
    info!("   POST   /api/people - Crear persona");
    info!("   GET    /api/person/:person_id - Obtener persona");
    info!("   PATCH  /api/person/:person_id - Editar persona");
    info!("   DELETE /api/person/:person_id - Eliminar persona");
    info!("🚗 Vehículos (bearer token):");
    info!("   GET    /api/vehicles/person/:person_id - Vehículos de una persona");
    info!("   POST   /api/vehicles/person/:person_id - Añadir vehículo (máx. 3)");
    info!("   GET    /api/vehicle/:vehicle_id/person/:person_id - Obtener vehículo");
    info!("   DELETE /api/vehicle/:vehicle_id/person/:person_id - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
