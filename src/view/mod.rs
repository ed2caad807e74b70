//! Platform view bookkeeping.
//!
//! Navigators never touch a real widget toolkit; they attach and detach views
//! through a [`ViewTree`], which records which region currently shows which
//! view and owns every materialized native view.

mod tree;

pub use tree::{FocusListener, LayoutId, NativeView, Parent, ViewId, ViewKind, ViewTree};
