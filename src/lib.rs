//! ipwhere - "what is my IP, and where am I"
//!
//! Resolves the caller's address from proxy headers or the TCP peer, and
//! enriches it with country / region / city / coordinates / ISP from a
//! local MaxMind database.
//!
//! # Architecture
//! - `utils::ip`: client IP resolution
//! - `services::geoip`: GeoIP data source and location records
//! - `api`: HTTP services and middleware
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: startup, shutdown and server mode
//! - `system`: logging and panic reporting

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
