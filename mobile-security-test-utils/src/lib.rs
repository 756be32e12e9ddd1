#![deny(rust_2018_idioms)]

mod bridge;
mod check;
mod publisher;

pub use bridge::{ready_bridge, ScriptedPinCheck};
pub use check::{Outcome, TestCheck};
pub use publisher::{PublishCall, TestMetricsPublisher};
