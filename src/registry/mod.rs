//! Screen-type registry.
//!
//! Populated once at application start; navigators resolve screen-type
//! strings through it into fresh [`crate::ScreenInstance`]s.

mod table;

pub use table::{NativeViewFactory, NavigatorFactory, ScreenDescriptor, ScreenKind, ScreenRegistry};
