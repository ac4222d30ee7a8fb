use anyhow::Context;
use serde::Deserialize;

use crate::action::Action;
use crate::device::{DeviceConfig, MobileTuning};
use crate::layout::LayoutPresets;

/// Longest accepted `settle_delay_ms`; the browser timer takes an `i32`.
pub const MAX_SETTLE_DELAY_MS: u32 = 10_000;

/// Touch controls configuration, read from an optional TOML string handed in
/// by the page. Every field falls back to the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub elements: ElementIds,
    /// Wait after `orientationchange` before measuring the viewport.
    pub settle_delay_ms: u32,
    pub pressed_opacity: f32,
    pub layout: LayoutPresets,
    pub device: DeviceConfig,
    pub mobile: MobileTuning,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            settle_delay_ms: 300,
            pressed_opacity: 0.7,
            layout: LayoutPresets::default(),
            device: DeviceConfig::default(),
            mobile: MobileTuning::default(),
        }
    }
}

impl ControlsConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: ControlsConfig =
            toml::from_str(content).context("Failed to parse touch controls config")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `content` if given, otherwise use the defaults.
    pub fn from_optional_toml(content: Option<&str>) -> anyhow::Result<Self> {
        match content {
            Some(content) if !content.trim().is_empty() => Self::from_toml_str(content),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.pressed_opacity),
            "pressed_opacity must be within 0.0..=1.0, got {}",
            self.pressed_opacity
        );
        anyhow::ensure!(
            self.settle_delay_ms <= MAX_SETTLE_DELAY_MS,
            "settle_delay_ms must be at most {MAX_SETTLE_DELAY_MS}, got {}",
            self.settle_delay_ms
        );
        anyhow::ensure!(
            !self.elements.game_container.is_empty(),
            "elements.game_container must not be empty"
        );
        Ok(())
    }
}

/// DOM ids and class names the controls attach to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub game_container: String,
    pub canvas: String,
    pub loading_screen: String,
    pub touch_controls_class: String,
    pub dpad_class: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub fire: String,
    pub fullscreen: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            game_container: "game-container".into(),
            canvas: "gameCanvas".into(),
            loading_screen: "loading-screen".into(),
            touch_controls_class: "touch-controls".into(),
            dpad_class: "d-pad".into(),
            up: "up-btn".into(),
            down: "down-btn".into(),
            left: "left-btn".into(),
            right: "right-btn".into(),
            fire: "shoot-btn".into(),
            fullscreen: "fullscreen-btn".into(),
        }
    }
}

impl ElementIds {
    /// Element id of the button driving `action`.
    pub fn region(&self, action: Action) -> &str {
        match action {
            Action::MoveUp => &self.up,
            Action::MoveDown => &self.down,
            Action::MoveLeft => &self.left,
            Action::MoveRight => &self.right,
            Action::Fire => &self.fire,
        }
    }
}
