mod client;
pub mod errors;
mod proxy;
pub mod types;

pub use client::{DisplayConfigClient, DisplayService, with_display_service};
pub use errors::ServiceError;
pub use types::{
    ApplyMethod, ConnectedMonitor, DisplayMode, DisplayState, LogicalMonitor,
    LogicalMonitorConfig, MonitorAssignment, MonitorSpec, Transform,
};
