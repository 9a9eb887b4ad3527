pub mod ip;

pub use ip::{extract_client_ip, resolve_client_ip, validate_ip};
