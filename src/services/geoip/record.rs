//! GeoIP 数据结构
//!
//! `CityRecord` / `IspRecord` 直接从 MMDB 解码；
//! `LocationRecord` / `IpResponse` 是对外返回的 JSON 结构。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 语言代码 → 本地化名称
pub type Names = BTreeMap<String, String>;

/// 带本地化名称的地理单元（国家 / 省份 / 城市）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NamedPlace {
    #[serde(default)]
    pub names: Names,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// GeoIP2 / GeoLite2 City 记录中用到的字段
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CityRecord {
    #[serde(default)]
    pub country: Option<NamedPlace>,
    #[serde(default)]
    pub subdivisions: Vec<NamedPlace>,
    #[serde(default)]
    pub city: Option<NamedPlace>,
    #[serde(default)]
    pub location: Option<Coordinates>,
}

/// GeoIP2-ISP / GeoLite2-ASN 记录中用到的字段
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IspRecord {
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub autonomous_system_organization: Option<String>,
}

impl IspRecord {
    /// ISP 名称，依次回退到 organization 和 ASN organization
    pub fn display_name(&self) -> Option<String> {
        [
            &self.isp,
            &self.organization,
            &self.autonomous_system_organization,
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .cloned()
    }
}

/// 按语言偏好挑选名称，全部缺失时返回空字符串
pub fn localized_name(names: &Names, locales: &[String]) -> String {
    locales
        .iter()
        .filter_map(|locale| names.get(locale))
        .find(|name| !name.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// 对外返回的地理位置信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl LocationRecord {
    /// 从 City 记录构建，名称按 `locales` 顺序回退
    pub fn from_city(city: &CityRecord, locales: &[String]) -> Self {
        let name_of = |place: Option<&NamedPlace>| {
            place
                .map(|p| localized_name(&p.names, locales))
                .unwrap_or_default()
        };
        let coords = city.location.unwrap_or_default();

        Self {
            country: name_of(city.country.as_ref()),
            region: name_of(city.subdivisions.first()),
            city: name_of(city.city.as_ref()),
            isp: None,
            latitude: coordinate(coords.latitude),
            longitude: coordinate(coords.longitude),
        }
    }

    pub fn set_isp(&mut self, isp: Option<String>) {
        self.isp = isp.filter(|name| !name.is_empty());
    }
}

/// 0 和非有限值视为未知坐标
fn coordinate(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// `/json` 的响应体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpResponse {
    pub ip: String,
    #[serde(default)]
    pub location: LocationRecord,
}

impl IpResponse {
    /// 只有 IP、没有位置信息的响应
    pub fn bare(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            location: LocationRecord::default(),
        }
    }
}
