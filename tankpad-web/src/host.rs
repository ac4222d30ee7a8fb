use js_sys::{Function, Object, Promise, Reflect};
use tankpad_shared::action::{Action, KeyFlag};
use tankpad_shared::fullscreen::{FullscreenPlatform, FULLSCREEN_ELEMENT_PROPERTIES};
use tankpad_shared::layout::{LayoutPreset, Viewport};
use tankpad_shared::{ControlHost, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Window};

use crate::dom::ControlElements;

/// [`ControlHost`] backed by the live page.
pub struct WebHost {
    window: Window,
    document: Document,
    elements: ControlElements,
    keys: Object,
    pending_settle: Option<u32>,
}

impl WebHost {
    pub fn new(window: Window, document: Document, elements: ControlElements) -> Self {
        let keys = game_keys(&window);
        Self {
            window,
            document,
            elements,
            keys,
            pending_settle: None,
        }
    }

    pub fn elements(&self) -> &ControlElements {
        &self.elements
    }

    /// Settle delay requested during the last dispatch, if any.
    pub fn take_pending_settle(&mut self) -> Option<u32> {
        self.pending_settle.take()
    }
}

impl FullscreenPlatform for WebHost {
    fn is_fullscreen(&self) -> bool {
        FULLSCREEN_ELEMENT_PROPERTIES.iter().any(|property| {
            Reflect::get(&self.document, &JsValue::from_str(property))
                .map(|value| !value.is_null() && !value.is_undefined())
                .unwrap_or(false)
        })
    }

    fn request_fullscreen(&mut self, method: &str) -> Result<(), PlatformError> {
        call_method(&self.elements.game_container, method)
    }

    fn exit_fullscreen(&mut self, method: &str) -> Result<(), PlatformError> {
        call_method(&self.document, method)
    }

    fn lock_orientation(&mut self, orientation: &str) -> Result<(), PlatformError> {
        let screen = self
            .window
            .screen()
            .map_err(|_| PlatformError::missing("screen"))?;
        let target = Reflect::get(&screen, &JsValue::from_str("orientation"))
            .ok()
            .filter(|value| value.is_object())
            .ok_or_else(|| PlatformError::missing("screen.orientation"))?;
        let lock = method(&target, "lock").ok_or_else(|| PlatformError::missing("screen.orientation.lock"))?;
        let result = lock
            .call1(&target, &JsValue::from_str(orientation))
            .map_err(|err| PlatformError::rejected("screen.orientation.lock", describe(&err)))?;
        watch_promise("screen.orientation.lock", result);
        Ok(())
    }
}

impl ControlHost for WebHost {
    fn publish_flag(&mut self, flag: KeyFlag, held: bool) {
        if let Err(err) = Reflect::set(&self.keys, &JsValue::from_str(flag.name()), &JsValue::from_bool(held)) {
            log::warn!("Failed to write keys.{}: {}", flag.name(), describe(&err));
        }
    }

    fn set_region_opacity(&mut self, action: Action, opacity: f32) {
        if let Some(region) = &self.elements.regions[action.index()] {
            if let Err(err) = region.style().set_property("opacity", &opacity.to_string()) {
                log::warn!("Failed to set {action:?} opacity: {}", describe(&err));
            }
        }
    }

    fn hide_overlay(&mut self) {
        if let Err(err) = self.elements.overlay.style().set_property("display", "none") {
            log::warn!("Failed to hide loading screen: {}", describe(&err));
        }
    }

    fn schedule_layout_settle(&mut self, delay_ms: u32) {
        self.pending_settle = Some(delay_ms);
    }

    fn viewport(&self) -> Viewport {
        let measure = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(
            measure(self.window.inner_width()) as f32,
            measure(self.window.inner_height()) as f32,
        )
    }

    fn apply_layout(&mut self, preset: &LayoutPreset) -> Result<(), PlatformError> {
        let dpad = &self.elements.dpad;
        let fire = self.elements.regions[Action::Fire.index()]
            .as_ref()
            .ok_or_else(|| PlatformError::missing("fire button"))?;
        set_bottom(dpad, &preset.dpad_bottom_css())?;
        set_bottom(fire, &preset.fire_bottom_css())
    }
}

/// The game's global `keys` object, created if the game hasn't made one yet.
fn game_keys(window: &Window) -> Object {
    let existing = Reflect::get(window, &JsValue::from_str("keys"))
        .ok()
        .filter(|value| value.is_object());
    match existing {
        Some(keys) => keys.unchecked_into::<Object>(),
        None => {
            log::warn!("window.keys not defined, creating it");
            let keys = Object::new();
            let _ = Reflect::set(window, &JsValue::from_str("keys"), &keys);
            keys
        }
    }
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Invoke `target[name]()` if it exists, watching any returned promise.
fn call_method(target: &JsValue, name: &str) -> Result<(), PlatformError> {
    let function = method(target, name).ok_or_else(|| PlatformError::missing(name))?;
    let result = function
        .call0(target)
        .map_err(|err| PlatformError::rejected(name, describe(&err)))?;
    watch_promise(name, result);
    Ok(())
}

/// Log a rejection of `value` if it is a promise. Never retried.
fn watch_promise(label: &str, value: JsValue) {
    let Ok(promise) = value.dyn_into::<Promise>() else {
        return;
    };
    let label = label.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            log::warn!("{label} rejected: {}", describe(&err));
        }
    });
}

fn set_bottom(element: &HtmlElement, value: &str) -> Result<(), PlatformError> {
    element
        .style()
        .set_property("bottom", value)
        .map_err(|err| PlatformError::rejected("style.bottom", describe(&err)))
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
