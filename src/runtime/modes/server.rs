//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{health_routes, locate_routes};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime;

/// 最多使用的 worker 数量
const MAX_WORKERS: usize = 32;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // When CORS is disabled, use browser's default same-origin policy
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "HEAD"])
        .max_age(cors_config.max_age as usize);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Register health and locate routes
///
/// The locate scope has an empty prefix, so it goes last.
pub fn configure_routes(cfg: &mut web::ServiceConfig, health_prefix: &str) {
    cfg.service(web::scope(health_prefix).service(health_routes()))
        .service(locate_routes());
}

/// Run the HTTP server
///
/// 1. Opens the GeoIP database (fatal on failure)
/// 2. Binds the configured TCP address
/// 3. Serves until the server stops or Ctrl+C is received
/// 4. Stops the workers, then releases the GeoIP handle
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        error!("Server startup failed: {:#}", e);
        e
    })?;

    let geoip = startup.geoip.clone();
    let app_start_time = startup.app_start_time.clone();
    let health_prefix = config.routes.health_prefix.clone();
    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let cpu_count = config.server.cpu_count.clamp(1, MAX_WORKERS);
    info!("Using {} worker threads", cpu_count);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(geoip.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| configure_routes(cfg, &health_prefix))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count);

    let host = config.server.host.clone();
    let port = config.server.port;
    let mut server = server
        .bind((host.as_str(), port))
        .with_context(|| format!("Failed to bind {}:{}", host, port))?
        .run();
    let server_handle = server.handle();
    warn!("Starting server at http://{}:{}", host, port);

    tokio::select! {
        res = &mut server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            // 等待 worker 退出后再释放 GeoIP 句柄
            server_handle.stop(true).await;
            warn!("Graceful shutdown: stopped accepting requests");
        }
    }

    lifetime::shutdown::release(startup);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cors_variants() {
        let _ = build_cors_middleware(&CorsConfig::default());

        let any = CorsConfig {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            max_age: 60,
        };
        let _ = build_cors_middleware(&any);

        let listed = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://example.com".to_string()],
            max_age: 60,
        };
        let _ = build_cors_middleware(&listed);
    }
}
