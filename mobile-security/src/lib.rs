#![deny(rust_2018_idioms)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod bridge;
mod check;
pub mod checks;
pub mod metrics;
mod service;
pub mod settings;

pub use crate::check::{CheckError, SecurityCheck, SecurityCheckResult};
pub use crate::checks::DeviceLockCheck;
pub use crate::metrics::{
    CheckResultMetrics, HttpMetricsPublisher, MetricsPublisher, MetricsRecord, PublishError,
    SecurityCheckResultMetric,
};
pub use crate::service::{SecurityError, SecurityService, METRICS_KEY};
pub use crate::settings::Settings;
