//! Server mode
//!
//! Starts the read-only reporting API.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::services::{AppStartTime, health_routes, reporting_routes};
use crate::runtime::lifetime;
use crate::storage::StorageFactory;

/// Run the HTTP server
///
/// **Note**: Configuration and logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = crate::config::get_config();

    let storage = Arc::new(
        StorageFactory::create(&config.database)
            .await
            .map_err(|e| {
                tracing::error!("Server startup failed: {}", e);
                e
            })?,
    );
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    // storage 移入闭包前先克隆连接，供关闭时使用
    let db_for_shutdown = storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(health_routes())
            .configure(reporting_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
