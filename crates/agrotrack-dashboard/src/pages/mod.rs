//! Page components for the telemetry dashboard

mod dashboard;

pub use dashboard::{Dashboard, DashboardContext};
pub use dashboard::actions::{load_records, submit_record};
