//! Navigation core of a mobile application shell.
//!
//! Screens come from three producers (embedded-runtime components, native
//! views and nested navigators) and are shown through stack, swap and tab
//! navigators. A single [`NavContext`] owns the registry, the navigator arena,
//! the view tree and the focus tracker, and every navigator call receives it
//! explicitly.

pub mod audit;
pub mod command;
pub mod context;
pub mod driver;
pub mod embedded;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod navigator;
pub mod registry;
pub mod screen;
pub mod view;

#[cfg(test)]
mod test_support;

pub use audit::{NavAudit, NavAuditEvent, NavAuditStage, NullNavAudit};
pub use command::{CommandSender, NavCommand};
pub use context::{LogFileSettings, NavConfig, NavContext, NavSettings, UiThread};
pub use driver::keys::{key_command, parse_key};
pub use driver::socket::{BridgeError, BridgeReply, BridgeResult, SocketBridge, decode_frame};
pub use embedded::{EmbeddedEvent, EmbeddedRuntime, NullEmbeddedRuntime, RootViewProps};
pub use error::{Misuse, NavError, Result, fail_fast};
pub use focus::FocusTracker;
pub use geometry::Size;
pub use logging::{
    BufferSink, FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError,
    LoggingResult,
};
pub use metrics::{MetricSnapshot, NavMetrics};
pub use navigator::{
    Navigator, NavigatorArena, NavigatorCore, NavigatorHandle, NavigatorKind, StackNavigator,
    SwapNavigator, Tab, TabBarPosition, TabNavigator,
};
pub use registry::{ScreenDescriptor, ScreenKind, ScreenRegistry};
pub use screen::{InstanceId, Materialized, ScreenHost, ScreenInstance};
pub use view::{FocusListener, LayoutId, NativeView, Parent, ViewId, ViewKind, ViewTree};
