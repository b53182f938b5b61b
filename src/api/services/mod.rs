pub mod health;
pub mod helpers;
pub mod reporting;

pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::{DataResponse, ErrorResponse, MessageResponse};
pub use reporting::{DailyV2Query, ReportingService, reporting_routes};
