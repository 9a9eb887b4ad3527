//! Shared fixtures: an in-memory GeoIP data source

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;

use ipwhere::services::geoip::record::{CityRecord, Coordinates, NamedPlace, Names};
use ipwhere::services::{GeoIpLookup, GeoIpProvider};

#[derive(Default)]
pub struct MemoryLookup {
    cities: HashMap<IpAddr, CityRecord>,
    isps: HashMap<IpAddr, String>,
}

impl MemoryLookup {
    pub fn with_city(mut self, ip: &str, city: CityRecord) -> Self {
        self.cities.insert(ip.parse().unwrap(), city);
        self
    }

    pub fn with_isp(mut self, ip: &str, isp: &str) -> Self {
        self.isps.insert(ip.parse().unwrap(), isp.to_string());
        self
    }
}

#[async_trait]
impl GeoIpLookup for MemoryLookup {
    async fn city(&self, ip: IpAddr) -> Option<CityRecord> {
        self.cities.get(&ip).cloned()
    }

    async fn isp(&self, ip: IpAddr) -> Option<String> {
        self.isps.get(&ip).cloned()
    }

    fn name(&self) -> &'static str {
        "Memory"
    }

    fn has_isp(&self) -> bool {
        !self.isps.is_empty()
    }
}

pub fn place(pairs: &[(&str, &str)]) -> NamedPlace {
    let names: Names = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    NamedPlace { names }
}

/// 1.1.1.1 -> Sydney
pub fn sydney() -> CityRecord {
    CityRecord {
        country: Some(place(&[("en", "Australia"), ("zh-CN", "澳大利亚")])),
        subdivisions: vec![place(&[("en", "New South Wales")])],
        city: Some(place(&[("en", "Sydney"), ("zh-CN", "悉尼")])),
        location: Some(Coordinates {
            latitude: Some(-33.8688),
            longitude: Some(151.209),
        }),
    }
}

/// Country-only record with no coordinates
pub fn country_only() -> CityRecord {
    CityRecord {
        country: Some(place(&[("en", "Germany")])),
        ..Default::default()
    }
}

pub fn provider(lookup: MemoryLookup) -> Arc<GeoIpProvider> {
    Arc::new(GeoIpProvider::with_lookup(
        Arc::new(lookup),
        vec!["zh-CN".to_string(), "en".to_string()],
    ))
}

pub fn default_provider() -> Arc<GeoIpProvider> {
    provider(
        MemoryLookup::default()
            .with_city("1.1.1.1", sydney())
            .with_city("8.8.8.8", country_only())
            .with_isp("8.8.8.8", "Google LLC"),
    )
}
