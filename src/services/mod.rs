pub mod geoip;

pub use geoip::{GeoIpLookup, GeoIpProvider, IpResponse, LocationRecord};
