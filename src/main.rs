//! Server binary: loads config, connects the database, mounts common and car routes.

use axum::Router;
use car_service::{
    app_router, common_routes_with_ready, config, db, telemetry, AppState, CarRepository, CarService,
    CarServiceImpl, PgCarRepository, Tracer, TracingTracer,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cfg = config::load()?;
    telemetry::init_logging(&cfg.log);
    tracing::info!(
        app = %cfg.app.name,
        collector = %format!("{}:{}", cfg.tracing.host, cfg.tracing.port),
        "starting"
    );

    let database_url = cfg.database.connection_url();
    db::ensure_database_exists(&database_url).await?;
    let pool = db::connect(&cfg.database).await?;
    db::ensure_cars_table(&pool).await?;

    let tracer: Arc<dyn Tracer> = Arc::new(TracingTracer);
    let repository: Arc<dyn CarRepository> = Arc::new(PgCarRepository::new(pool.clone(), tracer.clone()));
    let service: Arc<dyn CarService> = Arc::new(CarServiceImpl::new(repository.clone(), tracer.clone()));
    let state = AppState::new(service, tracer);

    let app = Router::new()
        .merge(common_routes_with_ready(repository))
        .merge(app_router(state, cfg.app.body_limit_bytes));

    let listener = TcpListener::bind(("0.0.0.0", cfg.app.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
