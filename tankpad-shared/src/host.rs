use crate::action::{Action, KeyFlag};
use crate::error::PlatformError;
use crate::fullscreen::FullscreenPlatform;
use crate::layout::{LayoutPreset, Viewport};

/// Everything [`crate::Controls`] needs from the page it runs on.
pub trait ControlHost: FullscreenPlatform {
    /// Mirror the effective value of `flag` to the game's key object.
    fn publish_flag(&mut self, flag: KeyFlag, held: bool);

    fn set_region_opacity(&mut self, action: Action, opacity: f32);

    fn hide_overlay(&mut self);

    /// Ask for a `LayoutSettle` event after `delay_ms`. Must not block.
    fn schedule_layout_settle(&mut self, delay_ms: u32);

    fn viewport(&self) -> Viewport;

    /// `Err(Missing)` if the D-pad cluster or the fire button is absent.
    fn apply_layout(&mut self, preset: &LayoutPreset) -> Result<(), PlatformError>;
}
