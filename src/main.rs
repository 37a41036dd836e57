use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_management::config::EnvironmentConfig;
use fleet_management::create_app;
use fleet_management::database::DatabaseConnection;
use fleet_management::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚕 Fleet Management Backend");
    info!("===========================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos y migraciones
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };
    db_connection.run_migrations().await?;
    info!("✅ Migraciones aplicadas");

    let state = AppState::new(db_connection.pool().clone(), config.clone());
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🧍 Driver:");
    info!("   POST   /api/driver - Crear driver");
    info!("   GET    /api/driver - Buscar drivers (filtros en query)");
    info!("   GET    /api/driver/:id - Obtener driver");
    info!("   PATCH  /api/driver/:id - Actualizar online status");
    info!("   DELETE /api/driver/:id - Eliminar driver");
    info!("   POST   /api/driver/:id/car/:car_id - Asignar car");
    info!("   DELETE /api/driver/:id/car/:car_id - Des-asignar car");
    info!("   PUT    /api/driver/:id/location - Actualizar geolocalización");
    info!("🚗 Car:");
    info!("   POST   /api/car - Crear car");
    info!("   GET    /api/car - Buscar cars (filtros en query)");
    info!("   GET    /api/car/:id - Obtener car");
    info!("   PUT    /api/car/:id - Actualizar car");
    info!("   DELETE /api/car/:id - Eliminar car");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
