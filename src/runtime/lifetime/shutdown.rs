use std::sync::Arc;

use tokio::signal;
use tracing::{debug, info, warn};

use super::startup::StartupContext;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// 释放启动时打开的资源
///
/// 返回 true 表示这是最后一个引用，provider 已随之销毁；
/// 否则还有 worker 持有克隆，由它们退出时释放。
pub fn release(context: StartupContext) -> bool {
    let StartupContext { geoip, .. } = context;
    let provider = geoip.provider_name();

    match Arc::try_unwrap(geoip) {
        Ok(last) => {
            drop(last);
            info!("GeoIP {} provider dropped", provider);
            true
        }
        Err(shared) => {
            debug!(
                "GeoIP {} handle released, {} reference(s) still held by server workers",
                provider,
                Arc::strong_count(&shared) - 1
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    use async_trait::async_trait;

    use crate::api::services::AppStartTime;
    use crate::services::GeoIpLookup;
    use crate::services::GeoIpProvider;
    use crate::services::geoip::record::CityRecord;

    struct EmptyLookup;

    #[async_trait]
    impl GeoIpLookup for EmptyLookup {
        async fn city(&self, _ip: IpAddr) -> Option<CityRecord> {
            None
        }

        async fn isp(&self, _ip: IpAddr) -> Option<String> {
            None
        }

        fn name(&self) -> &'static str {
            "Empty"
        }
    }

    fn context() -> StartupContext {
        StartupContext {
            geoip: Arc::new(GeoIpProvider::with_lookup(Arc::new(EmptyLookup), vec![])),
            app_start_time: AppStartTime::now(),
        }
    }

    #[test]
    fn test_release_drops_last_reference() {
        assert!(release(context()));
    }

    #[test]
    fn test_release_with_outstanding_clone() {
        let ctx = context();
        let worker_copy = Arc::clone(&ctx.geoip);

        assert!(!release(ctx));
        assert_eq!(Arc::strong_count(&worker_copy), 1);
    }
}
