use glam::Vec2;
use serde::Deserialize;

/// Current inner size of the browser window, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn orientation(&self) -> Orientation {
        // A square viewport counts as portrait.
        if self.size.x > self.size.y {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Distance of the controls from the bottom edge, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPreset {
    pub dpad_bottom: f32,
    pub fire_bottom: f32,
}

impl LayoutPreset {
    pub fn dpad_bottom_css(&self) -> String {
        format!("{}px", self.dpad_bottom)
    }

    pub fn fire_bottom_css(&self) -> String {
        format!("{}px", self.fire_bottom)
    }
}

/// Presets per orientation. In config, any field left out keeps the
/// built-in value for its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawLayoutPresets")]
pub struct LayoutPresets {
    pub landscape: LayoutPreset,
    /// Sits higher to clear the home indicator.
    pub portrait: LayoutPreset,
}

impl Default for LayoutPresets {
    fn default() -> Self {
        Self {
            landscape: LayoutPreset {
                dpad_bottom: 10.0,
                fire_bottom: 10.0,
            },
            portrait: LayoutPreset {
                dpad_bottom: 20.0,
                fire_bottom: 30.0,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLayoutPresets {
    landscape: RawPreset,
    portrait: RawPreset,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPreset {
    dpad_bottom: Option<f32>,
    fire_bottom: Option<f32>,
}

impl RawPreset {
    fn over(self, base: LayoutPreset) -> LayoutPreset {
        LayoutPreset {
            dpad_bottom: self.dpad_bottom.unwrap_or(base.dpad_bottom),
            fire_bottom: self.fire_bottom.unwrap_or(base.fire_bottom),
        }
    }
}

impl From<RawLayoutPresets> for LayoutPresets {
    fn from(raw: RawLayoutPresets) -> Self {
        let defaults = Self::default();
        Self {
            landscape: raw.landscape.over(defaults.landscape),
            portrait: raw.portrait.over(defaults.portrait),
        }
    }
}

impl LayoutPresets {
    pub fn for_orientation(&self, orientation: Orientation) -> LayoutPreset {
        match orientation {
            Orientation::Landscape => self.landscape,
            Orientation::Portrait => self.portrait,
        }
    }
}

/// Repositions the D-pad cluster and fire button after rotation.
#[derive(Debug, Clone)]
pub struct LayoutResponder {
    presets: LayoutPresets,
    settle_delay_ms: u32,
    last_applied: Option<Orientation>,
}

impl LayoutResponder {
    pub fn new(presets: LayoutPresets, settle_delay_ms: u32) -> Self {
        Self {
            presets,
            settle_delay_ms,
            last_applied: None,
        }
    }

    /// Delay to wait after an orientation signal before measuring.
    pub fn settle_delay_ms(&self) -> u32 {
        self.settle_delay_ms
    }

    pub fn last_applied(&self) -> Option<Orientation> {
        self.last_applied
    }

    /// Pick the preset for the measured viewport. Pure; does not record it.
    pub fn resolve(&self, viewport: Viewport) -> (Orientation, LayoutPreset) {
        let orientation = viewport.orientation();
        (orientation, self.presets.for_orientation(orientation))
    }

    /// Remember that `orientation`'s preset is on screen. Returns true if it
    /// differs from what was there before.
    pub fn record(&mut self, orientation: Orientation) -> bool {
        self.last_applied.replace(orientation) != Some(orientation)
    }
}

impl Default for LayoutResponder {
    fn default() -> Self {
        Self::new(LayoutPresets::default(), 300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_orientation() {
        assert_eq!(Viewport::new(800.0, 400.0).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(400.0, 800.0).orientation(), Orientation::Portrait);
        assert_eq!(Viewport::new(500.0, 500.0).orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_landscape_preset() {
        let responder = LayoutResponder::default();
        let (orientation, preset) = responder.resolve(Viewport::new(800.0, 400.0));
        assert_eq!(orientation, Orientation::Landscape);
        assert_eq!(preset.dpad_bottom, 10.0);
        assert_eq!(preset.fire_bottom, 10.0);
    }

    #[test]
    fn test_portrait_preset() {
        let responder = LayoutResponder::default();
        let (orientation, preset) = responder.resolve(Viewport::new(400.0, 800.0));
        assert_eq!(orientation, Orientation::Portrait);
        assert_eq!(preset.dpad_bottom_css(), "20px");
        assert_eq!(preset.fire_bottom_css(), "30px");
    }

    #[test]
    fn test_repeated_signals_converge() {
        let mut responder = LayoutResponder::default();
        let viewport = Viewport::new(812.0, 375.0);

        let (o1, p1) = responder.resolve(viewport);
        assert!(responder.record(o1));
        let (o2, p2) = responder.resolve(viewport);
        assert!(!responder.record(o2));

        assert_eq!(p1, p2);
        assert_eq!(responder.last_applied(), Some(Orientation::Landscape));
    }

    #[test]
    fn test_rotation_back_and_forth() {
        let mut responder = LayoutResponder::default();
        assert!(responder.record(Orientation::Portrait));
        assert!(responder.record(Orientation::Landscape));
        assert!(responder.record(Orientation::Portrait));
        assert_eq!(
            responder.resolve(Viewport::new(375.0, 812.0)).1,
            LayoutPresets::default().portrait
        );
    }

    #[test]
    fn test_default_settle_delay() {
        assert_eq!(LayoutResponder::default().settle_delay_ms(), 300);
    }
}
