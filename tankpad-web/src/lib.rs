//! tankpad WASM web runtime
//!
//! Installs the mobile touch controls of the tank game: builds the D-pad,
//! fire, fullscreen and loading-screen elements, wires their browser events
//! into the `tankpad-shared` state machines and mirrors the resulting key
//! state onto the game's global `keys` object.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
use tankpad_shared::ControlsConfig;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point — called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {e}")))?;
    log::info!("tankpad web runtime initialized");
    Ok(())
}

/// Install the touch controls on a mobile device.
///
/// Called from JavaScript once the DOM is ready. `config_toml` optionally
/// overrides element ids, layout presets and mobile tuning. Resolves to
/// `undefined` on desktop, where nothing is installed.
///
/// Physical keys are not routed by default, since the game's own listeners
/// already write `keys`. While they do, a touch release clears a flag even if
/// the key is still held. Call `TouchControls::route_keyboard` (and drop the
/// game's listeners) to merge keyboard and touch.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn install_touch_controls(config_toml: Option<String>) -> Result<Option<app::TouchControls>, JsValue> {
    let config = ControlsConfig::from_optional_toml(config_toml.as_deref())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    let window = web_sys::window().ok_or("No window")?;

    if !app::detect_device(&window, &config).is_mobile() {
        log::info!("Desktop device detected, touch controls not installed");
        return Ok(None);
    }

    log::info!("Mobile device detected, initializing touch controls");
    app::install(window, config).map(Some)
}

/// Whether the default device heuristic classifies this page as mobile.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn is_mobile_device() -> bool {
    web_sys::window()
        .map(|window| app::detect_device(&window, &ControlsConfig::default()).is_mobile())
        .unwrap_or(false)
}
