//! Screen instances: one per navigation slot.

mod host;
mod instance;

pub use host::ScreenHost;
pub use instance::{InstanceId, Materialized, ScreenInstance};
