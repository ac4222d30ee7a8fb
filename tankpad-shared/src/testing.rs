//! Recording fakes for the platform traits.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::action::{Action, KeyFlag};
use crate::error::PlatformError;
use crate::fullscreen::{FullscreenPlatform, ENTER_METHODS, EXIT_METHODS};
use crate::host::ControlHost;
use crate::layout::{LayoutPreset, Viewport};
use crate::session::AudioCapability;

/// Audio stub counting `init_audio` calls through a shared cell.
pub struct CountingAudio(Rc<Cell<u32>>);

impl CountingAudio {
    pub fn new() -> (Self, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        (Self(calls.clone()), calls)
    }
}

impl AudioCapability for CountingAudio {
    fn init_audio(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Fullscreen platform exposing only the listed method names.
pub struct FakeFullscreen {
    pub fullscreen: bool,
    pub methods: Vec<String>,
    pub calls: Vec<String>,
    pub locks: Vec<String>,
    pub lock_error: Option<PlatformError>,
}

impl FakeFullscreen {
    pub fn with_methods(methods: &[&str]) -> Self {
        Self {
            fullscreen: false,
            methods: methods.iter().map(|m| m.to_string()).collect(),
            calls: Vec::new(),
            locks: Vec::new(),
            lock_error: None,
        }
    }

    /// Unprefixed API only.
    pub fn standard() -> Self {
        Self::with_methods(&[ENTER_METHODS[0], EXIT_METHODS[0]])
    }

    fn call(&mut self, method: &str, fullscreen_after: bool) -> Result<(), PlatformError> {
        if !self.methods.iter().any(|m| m == method) {
            return Err(PlatformError::missing(method));
        }
        self.calls.push(method.to_string());
        self.fullscreen = fullscreen_after;
        Ok(())
    }
}

impl FullscreenPlatform for FakeFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self, method: &str) -> Result<(), PlatformError> {
        self.call(method, true)
    }

    fn exit_fullscreen(&mut self, method: &str) -> Result<(), PlatformError> {
        self.call(method, false)
    }

    fn lock_orientation(&mut self, orientation: &str) -> Result<(), PlatformError> {
        if let Some(err) = self.lock_error.clone() {
            return Err(err);
        }
        self.locks.push(orientation.to_string());
        Ok(())
    }
}

/// Host that records every side effect requested by `Controls`.
pub struct RecordingHost {
    pub published: Vec<(KeyFlag, bool)>,
    pub opacities: HashMap<Action, f32>,
    pub overlay_visible: bool,
    pub overlay_hides: u32,
    pub scheduled: Vec<u32>,
    pub viewport: Viewport,
    pub layout_targets: bool,
    pub applied: Vec<LayoutPreset>,
    pub fullscreen: FakeFullscreen,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            published: Vec::new(),
            opacities: HashMap::new(),
            overlay_visible: true,
            overlay_hides: 0,
            scheduled: Vec::new(),
            viewport: Viewport::new(375.0, 812.0),
            layout_targets: true,
            applied: Vec::new(),
            fullscreen: FakeFullscreen::standard(),
        }
    }
}

impl RecordingHost {
    /// Last value published for `flag`.
    pub fn flag(&self, flag: KeyFlag) -> Option<bool> {
        self.published
            .iter()
            .rev()
            .find(|(f, _)| *f == flag)
            .map(|(_, held)| *held)
    }

    pub fn opacity(&self, action: Action) -> Option<f32> {
        self.opacities.get(&action).copied()
    }
}

impl FullscreenPlatform for RecordingHost {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    fn request_fullscreen(&mut self, method: &str) -> Result<(), PlatformError> {
        self.fullscreen.request_fullscreen(method)
    }

    fn exit_fullscreen(&mut self, method: &str) -> Result<(), PlatformError> {
        self.fullscreen.exit_fullscreen(method)
    }

    fn lock_orientation(&mut self, orientation: &str) -> Result<(), PlatformError> {
        self.fullscreen.lock_orientation(orientation)
    }
}

impl ControlHost for RecordingHost {
    fn publish_flag(&mut self, flag: KeyFlag, held: bool) {
        self.published.push((flag, held));
    }

    fn set_region_opacity(&mut self, action: Action, opacity: f32) {
        self.opacities.insert(action, opacity);
    }

    fn hide_overlay(&mut self) {
        self.overlay_visible = false;
        self.overlay_hides += 1;
    }

    fn schedule_layout_settle(&mut self, delay_ms: u32) {
        self.scheduled.push(delay_ms);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn apply_layout(&mut self, preset: &LayoutPreset) -> Result<(), PlatformError> {
        if !self.layout_targets {
            return Err(PlatformError::missing(".d-pad"));
        }
        self.applied.push(*preset);
        Ok(())
    }
}
