//! GeoIP 服务模块
//!
//! 基于本地 MaxMind 数据库的 IP 地理位置查询：
//! - City 库：国家 / 省份 / 城市 / 经纬度
//! - ISP 库（可选）：运营商

mod maxmind;
mod provider;
pub mod record;

pub use maxmind::MaxMindProvider;
pub use provider::{GeoIpLookup, GeoIpProvider};
pub use record::{CityRecord, IpResponse, IspRecord, LocationRecord, localized_name};
