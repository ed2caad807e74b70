use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::context::NavContext;
use crate::navigator::Navigator;
use crate::screen::{InstanceId, ScreenInstance};
use crate::view::NativeView;

/// Builds the nested navigator for a navigator screen.
pub type NavigatorFactory = Rc<dyn Fn(&mut NavContext) -> Box<dyn Navigator>>;

/// Builds the platform view for a native screen.
pub type NativeViewFactory = Rc<dyn Fn(&mut NavContext) -> Box<dyn NativeView>>;

/// How a screen materializes. Exactly one producer per descriptor.
#[derive(Clone)]
pub enum ScreenKind {
    /// Rendered by the embedded UI runtime under this component name.
    Component(String),
    Navigator(NavigatorFactory),
    NativeView(NativeViewFactory),
}

impl ScreenKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScreenKind::Component(_) => "component",
            ScreenKind::Navigator(_) => "navigator",
            ScreenKind::NativeView(_) => "native_view",
        }
    }
}

impl fmt::Debug for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenKind::Component(name) => f.debug_tuple("Component").field(name).finish(),
            ScreenKind::Navigator(_) => f.write_str("Navigator(..)"),
            ScreenKind::NativeView(_) => f.write_str("NativeView(..)"),
        }
    }
}

/// Immutable description of a screen type, shared by all of its instances.
#[derive(Debug, Clone)]
pub struct ScreenDescriptor {
    screen_type: String,
    kind: ScreenKind,
}

impl ScreenDescriptor {
    pub fn component(screen_type: impl Into<String>, component_name: impl Into<String>) -> Self {
        Self {
            screen_type: screen_type.into(),
            kind: ScreenKind::Component(component_name.into()),
        }
    }

    pub fn navigator<F>(screen_type: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&mut NavContext) -> Box<dyn Navigator> + 'static,
    {
        Self {
            screen_type: screen_type.into(),
            kind: ScreenKind::Navigator(Rc::new(factory)),
        }
    }

    pub fn native_view<F>(screen_type: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&mut NavContext) -> Box<dyn NativeView> + 'static,
    {
        Self {
            screen_type: screen_type.into(),
            kind: ScreenKind::NativeView(Rc::new(factory)),
        }
    }

    pub fn screen_type(&self) -> &str {
        &self.screen_type
    }

    pub fn kind(&self) -> &ScreenKind {
        &self.kind
    }
}

#[derive(Debug, Default)]
pub struct ScreenRegistry {
    descriptors: HashMap<String, Rc<ScreenDescriptor>>,
    next_instance: u64,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its screen type. Last write wins.
    pub fn register(&mut self, descriptor: ScreenDescriptor) -> Option<Rc<ScreenDescriptor>> {
        self.descriptors
            .insert(descriptor.screen_type.clone(), Rc::new(descriptor))
    }

    pub fn contains(&self, screen_type: &str) -> bool {
        self.descriptors.contains_key(screen_type)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptor for `screen_type`; unknown types render as a component of
    /// the same name.
    pub fn descriptor(&self, screen_type: &str) -> Rc<ScreenDescriptor> {
        match self.descriptors.get(screen_type) {
            Some(descriptor) => Rc::clone(descriptor),
            None => Rc::new(ScreenDescriptor::component(screen_type, screen_type)),
        }
    }

    /// Create a brand-new instance for one navigation slot.
    pub fn resolve(&mut self, screen_type: &str) -> ScreenInstance {
        self.next_instance += 1;
        let id = InstanceId::new(self.next_instance);
        ScreenInstance::new(id, self.descriptor(screen_type))
    }
}
