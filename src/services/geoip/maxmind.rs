//! MaxMind GeoLite2 数据库实现
//!
//! City 库必需，ISP（或 ASN）库可选

use std::net::IpAddr;

use async_trait::async_trait;
use maxminddb::Reader;
use serde::de::DeserializeOwned;
use tracing::{info, trace, warn};

use super::provider::GeoIpLookup;
use super::record::{CityRecord, IspRecord};

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    city: Reader<Vec<u8>>,
    isp: Option<Reader<Vec<u8>>>,
}

impl MaxMindProvider {
    /// 打开 City 库和可选的 ISP 库
    ///
    /// ISP 库打不开只记录告警，后续 ISP 字段始终缺失
    pub fn open(city_path: &str, isp_path: Option<&str>) -> Result<Self, maxminddb::MaxMindDbError> {
        let city = Reader::open_readfile(city_path)?;
        info!(
            "GeoIP: Using MaxMind database at {} ({})",
            city_path, city.metadata.database_type
        );

        let isp = isp_path.and_then(|path| match Reader::open_readfile(path) {
            Ok(reader) => {
                info!(
                    "GeoIP: Using ISP database at {} ({})",
                    path, reader.metadata.database_type
                );
                Some(reader)
            }
            Err(e) => {
                warn!(
                    "GeoIP: Failed to load ISP database at {}: {}, ISP data disabled",
                    path, e
                );
                None
            }
        });

        Ok(Self { city, isp })
    }

    fn decode<T: DeserializeOwned>(reader: &Reader<Vec<u8>>, ip: IpAddr) -> Option<T> {
        let result = match reader.lookup(ip) {
            Ok(result) => result,
            Err(e) => {
                trace!("MaxMind lookup for {} failed: {}", ip, e);
                return None;
            }
        };
        result.decode::<T>().ok()?
    }
}

#[async_trait]
impl GeoIpLookup for MaxMindProvider {
    async fn city(&self, ip: IpAddr) -> Option<CityRecord> {
        Self::decode(&self.city, ip)
    }

    async fn isp(&self, ip: IpAddr) -> Option<String> {
        let reader = self.isp.as_ref()?;
        Self::decode::<IspRecord>(reader, ip)?.display_name()
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }

    fn has_isp(&self) -> bool {
        self.isp.is_some()
    }
}
