//! GeoIP Provider 抽象层
//!
//! `GeoIpLookup` 是底层数据源（MaxMind 或测试中的内存实现），
//! `GeoIpProvider` 在其上完成 IP 解析、语言回退和 ISP 合并。

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, trace};

use super::maxmind::MaxMindProvider;
use super::record::{CityRecord, IpResponse, LocationRecord};
use crate::config::GeoIpConfig;
use crate::errors::Result;

/// GeoIP 查询 trait
///
/// 查询失败一律返回 None，不区分"库里没有"与"库不可用"。
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    /// 查询城市级别信息
    async fn city(&self, ip: IpAddr) -> Option<CityRecord>;

    /// 查询 ISP / 组织名称
    async fn isp(&self, ip: IpAddr) -> Option<String>;

    /// 获取 provider 名称（用于日志和健康检查）
    fn name(&self) -> &'static str;

    /// 是否加载了 ISP 数据源
    fn has_isp(&self) -> bool {
        false
    }
}

/// 统一 GeoIP Provider
///
/// 启动时构建一次，只读共享给所有 worker
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
    locales: Vec<String>,
}

impl GeoIpProvider {
    /// 根据配置打开 MaxMind 数据库，City 库打不开时返回错误
    pub fn open(config: &GeoIpConfig) -> Result<Self> {
        let provider = MaxMindProvider::open(&config.city_db_path, config.isp_db_path.as_deref())?;
        let this = Self::with_lookup(Arc::new(provider), config.locales.clone());
        info!(
            "GeoIP: Initialized with {} provider (isp: {}, locales: {:?})",
            this.provider_name(),
            this.has_isp(),
            this.locales
        );
        Ok(this)
    }

    /// 使用任意数据源构建
    pub fn with_lookup(inner: Arc<dyn GeoIpLookup>, locales: Vec<String>) -> Self {
        Self { inner, locales }
    }

    /// 查询 IP 的位置信息
    ///
    /// IP 无法解析时返回空记录，不做任何查询
    pub async fn locate(&self, ip: &str) -> LocationRecord {
        let Ok(addr) = ip.parse::<IpAddr>() else {
            trace!("GeoIP: {:?} is not an IP address, skipping lookup", ip);
            return LocationRecord::default();
        };

        let mut record = match self.inner.city(addr).await {
            Some(city) => LocationRecord::from_city(&city, &self.locales),
            None => {
                trace!("GeoIP: no city data for {}", addr);
                LocationRecord::default()
            }
        };
        record.set_isp(self.inner.isp(addr).await);

        trace!(
            "GeoIP lookup for {}: country={:?}, region={:?}, city={:?}, isp={:?}",
            addr, record.country, record.region, record.city, record.isp
        );
        record
    }

    /// 构建完整的 JSON 响应
    pub async fn respond(&self, ip: &str) -> IpResponse {
        IpResponse {
            ip: ip.to_string(),
            location: self.locate(ip).await,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }

    pub fn has_isp(&self) -> bool {
        self.inner.has_isp()
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }
}

impl Clone for GeoIpProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            locales: self.locales.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::geoip::record::{Coordinates, NamedPlace};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLookup {
        calls: AtomicUsize,
        isp: Option<String>,
    }

    #[async_trait]
    impl GeoIpLookup for CountingLookup {
        async fn city(&self, _ip: IpAddr) -> Option<CityRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut names = crate::services::geoip::record::Names::new();
            names.insert("en".to_string(), "Japan".to_string());
            Some(CityRecord {
                country: Some(NamedPlace { names }),
                location: Some(Coordinates {
                    latitude: Some(35.69),
                    longitude: Some(139.69),
                }),
                ..Default::default()
            })
        }

        async fn isp(&self, _ip: IpAddr) -> Option<String> {
            self.isp.clone()
        }

        fn name(&self) -> &'static str {
            "Counting"
        }
    }

    fn provider(isp: Option<&str>) -> (GeoIpProvider, Arc<CountingLookup>) {
        let lookup = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
            isp: isp.map(String::from),
        });
        let provider = GeoIpProvider::with_lookup(
            lookup.clone(),
            vec!["zh-CN".to_string(), "en".to_string()],
        );
        (provider, lookup)
    }

    #[tokio::test]
    async fn test_invalid_ip_skips_lookup() {
        let (provider, lookup) = provider(Some("KDDI"));
        let record = provider.locate("not-an-ip").await;
        assert_eq!(record, LocationRecord::default());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_locate_merges_city_and_isp() {
        let (provider, _) = provider(Some("KDDI"));
        let record = provider.locate("203.0.113.7").await;
        assert_eq!(record.country, "Japan");
        assert_eq!(record.region, "");
        assert_eq!(record.isp.as_deref(), Some("KDDI"));
        assert_eq!(record.latitude, Some(35.69));
    }

    #[tokio::test]
    async fn test_missing_isp_is_omitted() {
        let (provider, _) = provider(None);
        let response = provider.respond("203.0.113.7").await;
        assert_eq!(response.ip, "203.0.113.7");
        assert!(response.location.isp.is_none());
        assert_eq!(provider.provider_name(), "Counting");
        assert!(!provider.has_isp());
    }
}
