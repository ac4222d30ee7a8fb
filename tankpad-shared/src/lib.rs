//! tankpad shared core
//!
//! Platform-agnostic state machines behind the mobile touch controls of the
//! tank game: the touch-to-key-state bridge, the loading-screen session gate,
//! the orientation layout responder and the fullscreen toggle. Nothing in
//! here touches the browser; the web runtime implements [`host::ControlHost`]
//! and feeds [`controls::ControlEvent`]s into [`controls::Controls`].

pub mod action;
pub mod bridge;
pub mod config;
pub mod controls;
pub mod device;
pub mod error;
pub mod fullscreen;
pub mod host;
pub mod key_state;
pub mod layout;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, KeyFlag};
pub use config::ControlsConfig;
pub use controls::{ControlEvent, Controls, Disposition, TouchPhase};
pub use error::PlatformError;
pub use host::ControlHost;
pub use key_state::{InputSource, KeyState};
