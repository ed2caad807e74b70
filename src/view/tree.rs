use std::collections::HashMap;
use std::fmt;

use crate::geometry::Size;
use crate::screen::InstanceId;

/// Optional capability of a native view that wants visibility callbacks.
pub trait FocusListener {
    fn on_focus(&mut self);
    fn on_blur(&mut self);
}

/// A platform-native view produced by a screen factory.
pub trait NativeView {
    fn name(&self) -> &str {
        "native_view"
    }

    /// Expose the focus capability, if this view implements it.
    fn focus_listener(&mut self) -> Option<&mut dyn FocusListener> {
        None
    }

    fn resize(&mut self, _size: Size) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// A container region that shows at most one content view at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(u64);

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout-{}", self.0)
    }
}

/// Where a view is currently attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// The window's root content.
    Root,
    Layout(LayoutId),
}

impl From<Option<LayoutId>> for Parent {
    fn from(target: Option<LayoutId>) -> Self {
        target.map(Parent::Layout).unwrap_or(Parent::Root)
    }
}

pub enum ViewKind {
    Native(Box<dyn NativeView>),
    /// Root view rendered by the embedded UI runtime.
    Embedded { component: String },
    /// Navigator-owned container, overlay or tab bar.
    Chrome { label: String },
}

impl fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Native(view) => f.debug_tuple("Native").field(&view.name()).finish(),
            ViewKind::Embedded { component } => {
                f.debug_struct("Embedded").field("component", component).finish()
            }
            ViewKind::Chrome { label } => f.debug_struct("Chrome").field("label", label).finish(),
        }
    }
}

#[derive(Debug)]
struct ViewNode {
    kind: ViewKind,
    owner: Option<InstanceId>,
    parent: Option<Parent>,
}

#[derive(Debug)]
struct LayoutNode {
    label: String,
    content: Option<ViewId>,
}

/// Parent/child bookkeeping for every view the navigation core created.
#[derive(Debug, Default)]
pub struct ViewTree {
    next_view: u64,
    next_layout: u64,
    views: HashMap<ViewId, ViewNode>,
    layouts: HashMap<LayoutId, LayoutNode>,
    root: Option<ViewId>,
    by_instance: HashMap<InstanceId, ViewId>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_native(&mut self, owner: InstanceId, view: Box<dyn NativeView>) -> ViewId {
        let id = self.insert(ViewKind::Native(view), Some(owner));
        self.by_instance.insert(owner, id);
        id
    }

    pub fn insert_embedded(&mut self, owner: InstanceId, component: impl Into<String>) -> ViewId {
        let id = self.insert(
            ViewKind::Embedded {
                component: component.into(),
            },
            Some(owner),
        );
        self.by_instance.insert(owner, id);
        id
    }

    pub fn insert_chrome(&mut self, label: impl Into<String>) -> ViewId {
        self.insert(
            ViewKind::Chrome {
                label: label.into(),
            },
            None,
        )
    }

    fn insert(&mut self, kind: ViewKind, owner: Option<InstanceId>) -> ViewId {
        self.next_view += 1;
        let id = ViewId(self.next_view);
        self.views.insert(
            id,
            ViewNode {
                kind,
                owner,
                parent: None,
            },
        );
        id
    }

    pub fn create_layout(&mut self, label: impl Into<String>) -> LayoutId {
        self.next_layout += 1;
        let id = LayoutId(self.next_layout);
        self.layouts.insert(
            id,
            LayoutNode {
                label: label.into(),
                content: None,
            },
        );
        id
    }

    /// Drop a layout region. Its content is detached, not removed.
    pub fn remove_layout(&mut self, layout: LayoutId) {
        if let Some(node) = self.layouts.remove(&layout) {
            if let Some(view) = node.content {
                if let Some(child) = self.views.get_mut(&view) {
                    child.parent = None;
                }
            }
        }
    }

    pub fn layout_label(&self, layout: LayoutId) -> Option<&str> {
        self.layouts.get(&layout).map(|node| node.label.as_str())
    }

    /// Make `view` the only content of `target` (`None` is the root content).
    ///
    /// The view is first detached from wherever it was, and whatever `target`
    /// showed before is detached. Returns `false` if either handle is unknown.
    pub fn set_content(&mut self, target: Option<LayoutId>, view: ViewId) -> bool {
        if !self.views.contains_key(&view) {
            return false;
        }
        if let Some(layout) = target {
            if !self.layouts.contains_key(&layout) {
                return false;
            }
        }

        self.detach(view);

        let previous = match target {
            Some(layout) => self
                .layouts
                .get_mut(&layout)
                .and_then(|node| node.content.replace(view)),
            None => self.root.replace(view),
        };
        if let Some(previous) = previous {
            if let Some(node) = self.views.get_mut(&previous) {
                node.parent = None;
            }
        }

        if let Some(node) = self.views.get_mut(&view) {
            node.parent = Some(Parent::from(target));
        }
        true
    }

    /// Remove `view` from its parent, if it has one.
    pub fn detach(&mut self, view: ViewId) {
        let Some(parent) = self.views.get_mut(&view).and_then(|node| node.parent.take()) else {
            return;
        };
        match parent {
            Parent::Root => {
                if self.root == Some(view) {
                    self.root = None;
                }
            }
            Parent::Layout(layout) => {
                if let Some(node) = self.layouts.get_mut(&layout) {
                    if node.content == Some(view) {
                        node.content = None;
                    }
                }
            }
        }
    }

    /// Detach and forget a view, handing back what it held.
    pub fn remove(&mut self, view: ViewId) -> Option<ViewKind> {
        self.detach(view);
        let node = self.views.remove(&view)?;
        if let Some(owner) = node.owner {
            if self.by_instance.get(&owner) == Some(&view) {
                self.by_instance.remove(&owner);
            }
        }
        Some(node.kind)
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains_key(&view)
    }

    pub fn parent_of(&self, view: ViewId) -> Option<Parent> {
        self.views.get(&view).and_then(|node| node.parent)
    }

    pub fn is_attached(&self, view: ViewId) -> bool {
        self.parent_of(view).is_some()
    }

    pub fn content_of(&self, target: Option<LayoutId>) -> Option<ViewId> {
        match target {
            Some(layout) => self.layouts.get(&layout).and_then(|node| node.content),
            None => self.root,
        }
    }

    pub fn kind(&self, view: ViewId) -> Option<&ViewKind> {
        self.views.get(&view).map(|node| &node.kind)
    }

    pub fn view_for_instance(&self, instance: InstanceId) -> Option<ViewId> {
        self.by_instance.get(&instance).copied()
    }

    pub fn native_mut(&mut self, view: ViewId) -> Option<&mut (dyn NativeView + 'static)> {
        match self.views.get_mut(&view).map(|node| &mut node.kind) {
            Some(ViewKind::Native(native)) => Some(native.as_mut()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
