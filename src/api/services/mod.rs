pub mod health;
pub mod locate;

pub use health::{AppStartTime, HealthService, health_routes};
pub use locate::{LocateService, locate_routes};
