//! Navigator contract and the three concrete state machines.
//!
//! A navigator renders into one layout region (or the window root), owns the
//! screen instances it shows and destroys them when they leave its history.
//! Back presses travel bottom-up: the current screen's nested navigator gets
//! the first chance to consume them.

mod arena;
mod stack;
mod swap;
mod tab;

use std::any::Any;
use std::fmt;

pub(crate) use arena::CheckoutError;
pub use arena::{NavigatorArena, NavigatorHandle};
pub use stack::StackNavigator;
pub use swap::SwapNavigator;
pub use tab::{Tab, TabBarPosition, TabNavigator};

use crate::context::NavContext;
use crate::error::{Misuse, fail_fast};
use crate::geometry::Size;
use crate::screen::ScreenInstance;
use crate::view::{LayoutId, ViewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorKind {
    Stack,
    Swap,
    Tab,
}

impl fmt::Display for NavigatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NavigatorKind::Stack => "stack",
            NavigatorKind::Swap => "swap",
            NavigatorKind::Tab => "tab",
        };
        f.write_str(label)
    }
}

/// State shared by every navigator: identity and where it renders.
#[derive(Debug)]
pub struct NavigatorCore {
    id: String,
    layout: Option<LayoutId>,
    size: Size,
    has_bound: bool,
    destroyed: bool,
    overlay: Option<ViewId>,
}

impl NavigatorCore {
    pub fn new(cx: &mut NavContext) -> Self {
        Self::with_id(cx.navigators_mut().next_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layout: None,
            size: Size::default(),
            has_bound: false,
            destroyed: false,
            overlay: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Region this navigator renders into; `None` is the window root.
    pub fn layout(&self) -> Option<LayoutId> {
        self.layout
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn has_bound(&self) -> bool {
        self.has_bound
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn record_bind(&mut self, layout: Option<LayoutId>, size: Size) {
        self.has_bound = true;
        self.layout = layout;
        self.size = size;
    }

    /// Flip into the destroyed state. Returns `false` if already destroyed.
    pub fn mark_destroyed(&mut self) -> bool {
        !std::mem::replace(&mut self.destroyed, true)
    }

    pub fn require_bound(&self, operation: &'static str) {
        if !self.has_bound {
            fail_fast(Misuse::NavigateBeforeBind {
                navigator: self.id.clone(),
                operation,
            });
        }
    }

    /// Show `view` as this navigator's whole content.
    pub fn set_content_view(&self, cx: &mut NavContext, view: ViewId) {
        if !self.has_bound {
            fail_fast(Misuse::ContentBeforeBind(self.id.clone()));
        }
        cx.views_mut().set_content(self.layout, view);
    }

    /// Drop the overlay view, if one is showing.
    pub(crate) fn release_overlay(&mut self, cx: &mut NavContext) {
        if let Some(view) = self.overlay.take() {
            cx.views_mut().remove(view);
        }
    }
}

/// Common contract of every navigable container.
///
/// All methods run on the UI thread and complete synchronously. Structural
/// misuse (navigating before the first bind, navigating a tab navigator)
/// panics.
pub trait Navigator: Any {
    fn core(&self) -> &NavigatorCore;

    fn core_mut(&mut self) -> &mut NavigatorCore;

    fn kind(&self) -> NavigatorKind;

    fn id(&self) -> &str {
        self.core().id()
    }

    /// Rename a navigator that is not registered yet. Registered navigators
    /// are renamed through [`NavContext::rename_navigator`].
    fn set_id(&mut self, id: &str) {
        self.core_mut().set_id(id);
    }

    /// The screen currently shown by this navigator, if any.
    fn current_screen(&self) -> Option<&ScreenInstance>;

    /// Render into `layout` (`None` is the window root). May be called again
    /// to move the navigator.
    fn bind_views(&mut self, cx: &mut NavContext, layout: Option<LayoutId>, size: Size);

    /// Tear down transient history so the navigator can be rebound later.
    fn destroy_views(&mut self, cx: &mut NavContext);

    /// Permanent teardown of every owned screen. Idempotent.
    fn destroy(&mut self, cx: &mut NavContext);

    fn navigate(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>);

    fn navigate_push(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>);

    /// Returns `true` if the back press was consumed.
    fn handle_back(&mut self, cx: &mut NavContext) -> bool;

    fn pop_to_top(&mut self, cx: &mut NavContext) -> bool;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Cover the navigator's region with a blank view until
    /// [`disable_overlay`](Self::disable_overlay).
    fn enable_overlay(&mut self, cx: &mut NavContext) {
        if !self.core().has_bound() || self.core().is_destroyed() {
            return;
        }
        let view = match self.core().overlay {
            Some(view) => view,
            None => cx.views_mut().insert_chrome(format!("{}:overlay", self.id())),
        };
        self.core_mut().overlay = Some(view);
        self.core().set_content_view(cx, view);
    }

    fn disable_overlay(&mut self, cx: &mut NavContext) {
        if self.core().overlay.is_none() {
            return;
        }
        self.core_mut().release_overlay(cx);
        let (layout, size) = (self.core().layout(), self.core().size());
        self.bind_views(cx, layout, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;

    #[test]
    fn core_starts_unbound_with_generated_id() {
        let mut h = Harness::new();
        let first = NavigatorCore::new(&mut h.cx);
        let second = NavigatorCore::new(&mut h.cx);
        assert!(first.id().starts_with("navigator-"));
        assert_ne!(first.id(), second.id());
        assert!(!first.has_bound());
    }

    #[test]
    #[should_panic(expected = "set content before its first bind_views")]
    fn content_before_bind_fails_fast() {
        let mut h = Harness::new();
        let core = NavigatorCore::with_id("early");
        let view = h.cx.views_mut().insert_chrome("blank");
        core.set_content_view(&mut h.cx, view);
    }

    #[test]
    fn mark_destroyed_reports_first_call_only() {
        let mut core = NavigatorCore::with_id("n");
        assert!(core.mark_destroyed());
        assert!(!core.mark_destroyed());
    }

    #[test]
    fn overlay_covers_and_restores_content() {
        let mut h = Harness::new();
        let mut stack = StackNavigator::new(&mut h.cx, "Home");
        stack.bind_views(&mut h.cx, None, Size::new(360, 640));
        let home_view = stack.current_screen().and_then(|s| s.view()).unwrap();

        stack.enable_overlay(&mut h.cx);
        let overlay = h.cx.views().content_of(None).unwrap();
        assert_ne!(overlay, home_view);
        assert!(!h.cx.views().is_attached(home_view));

        stack.disable_overlay(&mut h.cx);
        assert_eq!(h.cx.views().content_of(None), Some(home_view));
        assert!(!h.cx.views().contains(overlay));
    }

    #[test]
    fn overlay_before_bind_is_ignored() {
        let mut h = Harness::new();
        let mut stack = StackNavigator::new(&mut h.cx, "Home");
        stack.enable_overlay(&mut h.cx);
        assert!(h.cx.views().is_empty());
    }
}
