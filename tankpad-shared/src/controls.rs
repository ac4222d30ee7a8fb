use crate::action::{Action, KeyFlag};
use crate::bridge::{InputBridge, RegionChange, Release};
use crate::config::ControlsConfig;
use crate::fullscreen::{FullscreenController, ToggleOutcome};
use crate::host::ControlHost;
use crate::key_state::{InputSource, KeyState};
use crate::layout::LayoutResponder;
use crate::session::{AudioHandle, GateTransition, Interaction, SessionGate, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Begin,
    End,
    Cancel,
}

/// Everything the page can tell the controls about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Region { action: Action, phase: TouchPhase },
    Keyboard { flag: KeyFlag, pressed: bool },
    Overlay(Interaction),
    FullscreenButton,
    OrientationChanged,
    /// The settle timer scheduled by `OrientationChanged` fired.
    LayoutSettle,
    /// A `touchmove` anywhere in the document.
    TouchMove { editable_target: bool },
    /// Any touch on the game canvas.
    CanvasTouch,
}

/// Whether the browser's default handling of the event should be suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    PreventDefault,
    Default,
}

/// Tag names that keep native touch scrolling.
pub fn is_editable_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("INPUT") || tag_name.eq_ignore_ascii_case("TEXTAREA")
}

/// Owns the key state and the four touch-control state machines and routes
/// page events into them.
pub struct Controls {
    keys: KeyState,
    bridge: InputBridge,
    gate: SessionGate,
    layout: LayoutResponder,
    fullscreen: FullscreenController,
}

impl Controls {
    pub fn new(config: &ControlsConfig, audio: AudioHandle) -> Self {
        Self {
            keys: KeyState::new(),
            bridge: InputBridge::new(config.pressed_opacity),
            gate: SessionGate::new(audio),
            layout: LayoutResponder::new(config.layout, config.settle_delay_ms),
            fullscreen: FullscreenController::new(),
        }
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn bridge(&self) -> &InputBridge {
        &self.bridge
    }

    pub fn session_state(&self) -> SessionState {
        self.gate.state()
    }

    pub fn layout(&self) -> &LayoutResponder {
        &self.layout
    }

    /// The page has no element for `action`; its region is ignored from now on.
    pub fn mark_unwired(&mut self, action: Action) {
        self.bridge.mark_unwired(action, &mut self.keys);
    }

    pub fn dispatch<H: ControlHost + ?Sized>(&mut self, event: ControlEvent, host: &mut H) -> Disposition {
        match event {
            ControlEvent::Region { action, .. } if !self.bridge.region(action).wired => {
                Disposition::Default
            }
            ControlEvent::Region { action, phase } => {
                let change = match phase {
                    TouchPhase::Begin => self.bridge.activate(action, &mut self.keys),
                    TouchPhase::End => self.bridge.deactivate(action, Release::End, &mut self.keys),
                    TouchPhase::Cancel => {
                        self.bridge.deactivate(action, Release::Cancel, &mut self.keys)
                    }
                };
                if change != RegionChange::Unchanged {
                    host.set_region_opacity(action, self.bridge.opacity(action));
                    for flag in action.flags() {
                        host.publish_flag(*flag, self.keys.is_held(*flag));
                    }
                }
                match phase {
                    TouchPhase::Begin => Disposition::PreventDefault,
                    TouchPhase::End | TouchPhase::Cancel => Disposition::Default,
                }
            }
            ControlEvent::Keyboard { flag, pressed } => {
                let changed = if pressed {
                    self.keys.set(InputSource::Keyboard, flag)
                } else {
                    self.keys.clear(InputSource::Keyboard, flag)
                };
                if changed {
                    host.publish_flag(flag, self.keys.is_held(flag));
                }
                Disposition::Default
            }
            ControlEvent::Overlay(interaction) => {
                if self.gate.interact(interaction) == GateTransition::Activated {
                    host.hide_overlay();
                }
                match interaction {
                    Interaction::TouchBegin => Disposition::PreventDefault,
                    Interaction::Click => Disposition::Default,
                }
            }
            ControlEvent::FullscreenButton => {
                match self.fullscreen.toggle(host) {
                    ToggleOutcome::Entered { method } => log::info!("Entered fullscreen via {method}"),
                    ToggleOutcome::Exited { method } => log::info!("Exited fullscreen via {method}"),
                    ToggleOutcome::Unsupported => {}
                }
                Disposition::PreventDefault
            }
            ControlEvent::OrientationChanged => {
                host.schedule_layout_settle(self.layout.settle_delay_ms());
                Disposition::Default
            }
            ControlEvent::LayoutSettle => {
                let (orientation, preset) = self.layout.resolve(host.viewport());
                match host.apply_layout(&preset) {
                    Ok(()) => {
                        if self.layout.record(orientation) {
                            log::debug!("Controls moved to {orientation:?} layout");
                        }
                    }
                    Err(err) => log::warn!("Skipping {orientation:?} layout: {err}"),
                }
                Disposition::Default
            }
            ControlEvent::TouchMove { editable_target } => {
                if editable_target {
                    Disposition::Default
                } else {
                    Disposition::PreventDefault
                }
            }
            ControlEvent::CanvasTouch => Disposition::PreventDefault,
        }
    }
}
