use glam::UVec2;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// One-shot classification from the user agent and the window width.
    pub fn classify(user_agent: &str, inner_width: f64, config: &DeviceConfig) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let ua_match = config
            .user_agent_tokens
            .iter()
            .any(|token| ua.contains(&token.to_ascii_lowercase()));

        if ua_match || inner_width < config.narrow_width {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == DeviceClass::Mobile
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Windows narrower than this are treated as mobile regardless of UA.
    pub narrow_width: f64,
    pub user_agent_tokens: Vec<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            narrow_width: 800.0,
            user_agent_tokens: [
                "Android",
                "webOS",
                "iPhone",
                "iPad",
                "iPod",
                "BlackBerry",
                "IEMobile",
                "Opera Mini",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Performance settings applied once a mobile device is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MobileTuning {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub max_enemies: u32,
}

impl Default for MobileTuning {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 450,
            max_enemies: 3,
        }
    }
}

impl MobileTuning {
    pub fn canvas_size(&self) -> UVec2 {
        UVec2::new(self.canvas_width, self.canvas_height)
    }

    /// New value for the game's enemy cap. `None` when the game doesn't
    /// define one; the cap is only ever lowered.
    pub fn adjust_max_enemies(&self, current: Option<f64>) -> Option<f64> {
        current.map(|value| value.min(self.max_enemies as f64))
    }
}
