//! Loading-screen gate.
//!
//! Mobile browsers only unlock audio inside a user gesture, so the game stays
//! behind an overlay until the first tap or click. The gate is one-way: once
//! active it ignores every further interaction.

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInteraction,
    Active,
}

/// A gesture on the loading overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    TouchBegin,
    Click,
}

/// Result of feeding an interaction into the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// First qualifying gesture: hide the overlay.
    Activated,
    Ignored,
}

/// The game's audio subsystem, as far as this crate cares about it.
pub trait AudioCapability {
    fn init_audio(&mut self);
}

/// Audio subsystem that may not exist on the page. Absent by default.
#[derive(Default)]
pub struct AudioHandle(Option<Box<dyn AudioCapability>>);

impl AudioHandle {
    pub fn new(audio: impl AudioCapability + 'static) -> Self {
        Self(Some(Box::new(audio)))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Initialize audio if and only if the capability exists.
    fn init(&mut self) -> bool {
        match self.0.as_mut() {
            Some(audio) => {
                audio.init_audio();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AudioHandle").field(&self.is_present()).finish()
    }
}

#[derive(Debug)]
pub struct SessionGate {
    state: SessionState,
    audio: AudioHandle,
}

impl SessionGate {
    pub fn new(audio: AudioHandle) -> Self {
        Self {
            state: SessionState::AwaitingInteraction,
            audio,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn interact(&mut self, interaction: Interaction) -> GateTransition {
        match self.state {
            SessionState::Active => GateTransition::Ignored,
            SessionState::AwaitingInteraction => {
                self.state = SessionState::Active;
                if self.audio.init() {
                    log::info!("Session started by {interaction:?}, audio initialized");
                } else {
                    log::info!("Session started by {interaction:?}, no audio subsystem");
                }
                GateTransition::Activated
            }
        }
    }
}
