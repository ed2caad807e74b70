use serde_json::json;

use crate::context::NavContext;
use crate::geometry::Size;
use crate::logging::{LogLevel, json_kv};
use crate::view::LayoutId;

use super::ScreenInstance;

const LOG_TARGET: &str = "nav::screen";

/// A navigation screen embedded inside a region owned by the embedded UI
/// runtime.
///
/// The runtime sets two props, the owning navigator's id and the screen type.
/// Once both are known the host resolves a fresh instance and binds it into its
/// own layout on behalf of that navigator. A navigator id that is not (or no
/// longer) registered leaves the host empty.
pub struct ScreenHost {
    layout: LayoutId,
    navigator_id: Option<String>,
    screen_type: Option<String>,
    hosted: Option<ScreenInstance>,
}

impl ScreenHost {
    pub fn new(cx: &mut NavContext) -> Self {
        Self {
            layout: cx.views_mut().create_layout("screen-host"),
            navigator_id: None,
            screen_type: None,
            hosted: None,
        }
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    pub fn hosted(&self) -> Option<&ScreenInstance> {
        self.hosted.as_ref()
    }

    pub fn set_navigator_id(&mut self, cx: &mut NavContext, navigator_id: &str) {
        if self.navigator_id.as_deref() == Some(navigator_id) {
            return;
        }
        self.navigator_id = Some(navigator_id.to_string());
        self.update(cx);
    }

    pub fn set_screen_type(&mut self, cx: &mut NavContext, screen_type: &str) {
        if self.screen_type.as_deref() == Some(screen_type) {
            return;
        }
        self.screen_type = Some(screen_type.to_string());
        self.update(cx);
    }

    fn update(&mut self, cx: &mut NavContext) {
        if let Some(mut previous) = self.hosted.take() {
            previous.destroy(cx);
        }

        let (Some(navigator_id), Some(screen_type)) = (&self.navigator_id, &self.screen_type)
        else {
            return;
        };

        let Some(handle) = cx.find_navigator(navigator_id) else {
            cx.log(
                LogLevel::Debug,
                LOG_TARGET,
                "host_navigator_missing",
                [json_kv("navigator", json!(navigator_id))],
            );
            return;
        };

        let mut instance = cx.resolve_screen(screen_type);
        let layout = self.layout;
        let bound = cx.with_navigator(handle, |navigator, cx| {
            instance.bind(cx, navigator.core(), Some(layout), Size::default(), 0);
        });
        if bound.is_none() {
            cx.log(
                LogLevel::Warn,
                LOG_TARGET,
                "host_navigator_busy",
                [json_kv("navigator", json!(navigator_id))],
            );
        }
        self.hosted = Some(instance);
    }

    pub fn destroy(&mut self, cx: &mut NavContext) {
        if let Some(mut hosted) = self.hosted.take() {
            hosted.destroy(cx);
        }
        cx.views_mut().remove_layout(self.layout);
    }
}
