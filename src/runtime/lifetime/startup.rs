//! Server startup preparation
//!
//! Opens the read-only GeoIP data source before any traffic is accepted.
//! A city database that fails to open aborts startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::AppStartTime;
use crate::config::StaticConfig;
use crate::services::GeoIpProvider;

/// Everything the HTTP workers share
pub struct StartupContext {
    pub geoip: Arc<GeoIpProvider>,
    pub app_start_time: AppStartTime,
}

/// 准备服务器启动的上下文
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    let app_start_time = AppStartTime::now();
    debug!("Starting pre-startup processing...");

    let geoip = GeoIpProvider::open(&config.geoip).with_context(|| {
        format!(
            "Failed to open GeoIP city database at {}",
            config.geoip.city_db_path
        )
    })?;

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        geoip: Arc::new(geoip),
        app_start_time,
    })
}
