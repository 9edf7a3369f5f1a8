use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info, warn};

use fleet_maintenance::config::environment::EnvironmentConfig;
use fleet_maintenance::create_app;
use fleet_maintenance::repositories::vehicle_repository::VehicleRepository;
use fleet_maintenance::state::AppState;
use fleet_maintenance::views::fleet_view::FleetWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚛 Fleet Maintenance - API de Gestión de Flota");
    info!("===============================================");
    info!("🌍 Entorno: {}", config.environment);
    if !config.is_development() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: no se aceptan orígenes cruzados");
    }

    let repository = Arc::new(VehicleRepository::default());
    spawn_fleet_watcher(repository.clone());

    let app_state = AppState::with_repository(config.clone(), repository);
    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🚗 Endpoints - Vehicles:");
    info!("   GET    /vehicles - Listar vehículos con alertas");
    info!("   POST   /vehicles - Registrar vehículo");
    info!("   GET    /vehicles/:id - Obtener vehículo");
    info!("   PUT    /vehicles/:id/mileage - Actualizar kilometraje");
    info!("   DELETE /vehicles/:id - Eliminar vehículo");
    info!("   GET    /vehicles/:id/alerts - Alertas del vehículo");
    info!("📊 Endpoints - Fleet:");
    info!("   GET    /fleet/summary - Resumen de la flota");
    info!("   GET    /health - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Registrar en logs el resumen de la flota después de cada commit
fn spawn_fleet_watcher(repository: Arc<VehicleRepository>) {
    let mut watcher = FleetWatcher::new(repository);
    tokio::spawn(async move {
        while let Some(summary) = watcher.next().await {
            debug!(
                "📋 Flota: {} vehículos, {} alertas",
                summary.total_vehicles, summary.total_alerts
            );
        }
    });
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
