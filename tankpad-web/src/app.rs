use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use tankpad_shared::action::{Action, KeyFlag};
use tankpad_shared::device::{DeviceClass, MobileTuning};
use tankpad_shared::session::{Interaction, SessionState};
use tankpad_shared::{ControlEvent, Controls, ControlsConfig, Disposition, TouchPhase};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, Window};

use crate::audio;
use crate::dom;
use crate::events;
use crate::host::WebHost;

/// Core state machines plus the page they drive.
struct Runtime {
    controls: Controls,
    host: WebHost,
}

type Shared = Rc<RefCell<Runtime>>;

/// Handle returned to JavaScript once the touch controls are installed.
#[wasm_bindgen]
pub struct TouchControls {
    runtime: Shared,
}

#[wasm_bindgen]
impl TouchControls {
    /// Route a physical key press into the shared key state.
    /// Returns false for keys the game doesn't use.
    pub fn keyboard_down(&self, key: &str) -> bool {
        self.keyboard(key, true)
    }

    pub fn keyboard_up(&self, key: &str) -> bool {
        self.keyboard(key, false)
    }

    /// Whether a flag of the `keys` object (`"w"`, `"arrowUp"`, `"space"`, ...) is held.
    pub fn is_held(&self, flag: &str) -> bool {
        let Some(flag) = KeyFlag::from_name(flag) else {
            return false;
        };
        self.read(|controls| controls.keys().is_held(flag)).unwrap_or(false)
    }

    pub fn session_active(&self) -> bool {
        self.read(|controls| controls.session_state() == SessionState::Active)
            .unwrap_or(false)
    }

    pub fn toggle_fullscreen(&self) {
        dispatch(&self.runtime, ControlEvent::FullscreenButton);
    }

    /// Listen for keydown/keyup on the window so keyboard and touch share one
    /// OR-merged key state.
    ///
    /// Not called by `install_touch_controls`. Touch releases only leave a
    /// keyboard-held key alone when the keyboard goes through this state, so
    /// the game must drop its own `keys` writers when it calls this (or feed
    /// `keyboard_down`/`keyboard_up` itself).
    pub fn route_keyboard(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        for (name, pressed) in [("keydown", true), ("keyup", false)] {
            forward(&self.runtime, &window, name, move |event| {
                let key = event.dyn_ref::<KeyboardEvent>()?.key();
                KeyFlag::from_key(&key).map(|flag| ControlEvent::Keyboard { flag, pressed })
            })?;
        }
        Ok(())
    }
}

impl TouchControls {
    /// Read the controls unless a dispatch is in progress (page JS called
    /// back into us from `gameAudio.initAudio`, for instance).
    fn read<T>(&self, f: impl FnOnce(&Controls) -> T) -> Option<T> {
        match self.runtime.try_borrow() {
            Ok(rt) => Some(f(&rt.controls)),
            Err(_) => {
                log::warn!("Touch controls busy, state read skipped");
                None
            }
        }
    }

    fn keyboard(&self, key: &str, pressed: bool) -> bool {
        match KeyFlag::from_key(key) {
            Some(flag) => {
                dispatch(&self.runtime, ControlEvent::Keyboard { flag, pressed });
                true
            }
            None => false,
        }
    }
}

/// One-shot mobile/desktop classification of the current page.
pub fn detect_device(window: &Window, config: &ControlsConfig) -> DeviceClass {
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX);
    DeviceClass::classify(&user_agent, width, &config.device)
}

/// Build the touch UI, wire every listener and return the JS handle.
pub fn install(window: Window, config: ControlsConfig) -> Result<TouchControls, JsValue> {
    let document = window.document().ok_or("No document")?;
    let elements = dom::build(&document, &config.elements)?;

    apply_mobile_tuning(&window, elements.canvas.as_ref(), &config.mobile);

    let mut controls = Controls::new(&config, audio::audio_handle(&window));
    for action in Action::ALL {
        if elements.regions[action.index()].is_none() {
            controls.mark_unwired(action);
        }
    }
    let runtime: Shared = Rc::new(RefCell::new(Runtime {
        controls,
        host: WebHost::new(window.clone(), document.clone(), elements),
    }));

    wire(&runtime, &window, &document)?;

    log::info!("Touch controls installed");
    Ok(TouchControls { runtime })
}

fn wire(runtime: &Shared, window: &Window, document: &web_sys::Document) -> Result<(), JsValue> {
    let (regions, overlay, fullscreen_button, canvas) = {
        let rt = runtime.borrow();
        let elements = rt.host.elements();
        (
            elements.regions.clone(),
            elements.overlay.clone(),
            elements.fullscreen_button.clone(),
            elements.canvas.clone(),
        )
    };

    for action in Action::ALL {
        let Some(region) = &regions[action.index()] else {
            continue;
        };
        for (name, phase) in [
            ("touchstart", TouchPhase::Begin),
            ("touchend", TouchPhase::End),
            ("touchcancel", TouchPhase::Cancel),
        ] {
            forward(runtime, region, name, move |_| Some(ControlEvent::Region { action, phase }))?;
        }
    }

    forward(runtime, &overlay, "touchstart", |_| {
        Some(ControlEvent::Overlay(Interaction::TouchBegin))
    })?;
    forward(runtime, &overlay, "click", |_| Some(ControlEvent::Overlay(Interaction::Click)))?;

    forward(runtime, &fullscreen_button, "touchstart", |_| {
        Some(ControlEvent::FullscreenButton)
    })?;

    forward(runtime, document, "touchmove", |event| {
        let editable_target = events::target_tag(event)
            .map(|tag| tankpad_shared::controls::is_editable_tag(&tag))
            .unwrap_or(false);
        Some(ControlEvent::TouchMove { editable_target })
    })?;

    if let Some(canvas) = &canvas {
        for name in ["touchstart", "touchmove", "touchend"] {
            forward(runtime, canvas, name, |_| Some(ControlEvent::CanvasTouch))?;
        }
    }

    forward(runtime, window, "orientationchange", |_| {
        Some(ControlEvent::OrientationChanged)
    })?;

    Ok(())
}

/// Translate a DOM event into a control event and dispatch it.
fn forward<F>(runtime: &Shared, target: &EventTarget, name: &str, translate: F) -> Result<(), JsValue>
where
    F: Fn(&Event) -> Option<ControlEvent> + 'static,
{
    let runtime = runtime.clone();
    events::listen(target, name, move |event: Event| {
        if let Some(control_event) = translate(&event) {
            if dispatch(&runtime, control_event) == Disposition::PreventDefault {
                event.prevent_default();
            }
        }
    })
}

fn dispatch(runtime: &Shared, event: ControlEvent) -> Disposition {
    let (disposition, settle) = {
        let Ok(mut rt) = runtime.try_borrow_mut() else {
            log::warn!("Dropped re-entrant {event:?}");
            return Disposition::Default;
        };
        let Runtime { controls, host } = &mut *rt;
        let disposition = controls.dispatch(event, &mut *host);
        (disposition, host.take_pending_settle())
    };

    if let Some(delay_ms) = settle {
        schedule_settle(runtime, delay_ms);
    }
    disposition
}

/// Fire `LayoutSettle` once the rotation has had time to finish.
fn schedule_settle(runtime: &Shared, delay_ms: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(timeout) = i32::try_from(delay_ms) else {
        log::warn!("Layout settle delay {delay_ms}ms out of range, update skipped");
        return;
    };
    let runtime = runtime.clone();
    let callback = Closure::once_into_js(move || {
        dispatch(&runtime, ControlEvent::LayoutSettle);
    });
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        timeout,
    ) {
        log::warn!("Failed to schedule layout update: {err:?}");
    }
}

/// Shrink the canvas and lower the enemy cap for mobile hardware.
fn apply_mobile_tuning(window: &Window, canvas: Option<&HtmlCanvasElement>, tuning: &MobileTuning) {
    if let Some(canvas) = canvas {
        let size = tuning.canvas_size();
        canvas.set_width(size.x);
        canvas.set_height(size.y);
    }

    let key = JsValue::from_str("MAX_ENEMIES");
    let current = Reflect::get(window, &key).ok().and_then(|v| v.as_f64());
    if let Some(adjusted) = tuning.adjust_max_enemies(current) {
        if Reflect::set(window, &key, &JsValue::from_f64(adjusted)).is_ok() {
            log::info!("MAX_ENEMIES set to {adjusted}");
        }
    }
}
