use js_sys::{Function, Reflect};
use tankpad_shared::session::{AudioCapability, AudioHandle};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// The page's `window.gameAudio` object, captured when it exposes `initAudio`.
pub struct WindowAudio {
    target: JsValue,
    init: Function,
}

impl WindowAudio {
    pub fn probe(window: &Window) -> Option<Self> {
        let target = Reflect::get(window, &JsValue::from_str("gameAudio"))
            .ok()
            .filter(|value| value.is_object())?;
        let init = Reflect::get(&target, &JsValue::from_str("initAudio"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self { target, init })
    }
}

impl AudioCapability for WindowAudio {
    fn init_audio(&mut self) {
        if let Err(err) = self.init.call0(&self.target) {
            log::warn!("gameAudio.initAudio threw: {err:?}");
        }
    }
}

pub fn audio_handle(window: &Window) -> AudioHandle {
    match WindowAudio::probe(window) {
        Some(audio) => AudioHandle::new(audio),
        None => {
            log::warn!("window.gameAudio.initAudio not found, audio unlock disabled");
            AudioHandle::absent()
        }
    }
}
