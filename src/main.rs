use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use garage_gateway::config::environment::EnvironmentConfig;
use garage_gateway::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("configuración inválida")?;

    // Configurar logging según el modo de ejecución
    let max_level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    info!("🔧 Garage Gateway - Proxy Firestore");
    info!("==================================");
    info!("📦 Proyecto Firestore: {}", config.firestore_project);
    info!("🌍 Entorno: {}", config.environment);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("dirección inválida: {}", config.server_url()))?;

    let app = create_app(AppState::new(config)?);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Descripción del servicio");
    info!("   GET  /health - Health check");
    info!("🚗 Voitures:");
    info!("   GET  /voitures - Listar vehículos");
    info!("   GET  /voitures/:id/pannes - Pannes de un vehículo");
    info!("   GET  /voitures/:id/complete - Vehículo con sus pannes");
    info!("📄 Firestore directo:");
    info!("   GET  /documents/*path - Documento arbitrario");
    info!("   POST /query - Consulta estructurada");
    info!("🛠️ Pannes:");
    info!("   POST /pannes - Pannes por idVoiture");
    info!("   GET  /pannes/:id/details - Detalles de panne");
    info!("   POST /panneDetails - Detalles por idPanne");
    info!("   GET  /panneTypes/:id - Tipo de panne");
    info!("   POST /pannes/:id/statut - Marcar como reparada");
    info!("   GET  /pannes/:id/statuts - Historial de estados");
    info!("   POST /panneStatuts - Crear documento de estado");
    info!("   GET  /pannes/:id/paiement - Estado de pago");
    info!("   GET  /pannes/:id/est-reparee - Panne resuelta");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("no se pudo escuchar en {}", addr))?;

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
