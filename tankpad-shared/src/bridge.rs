use crate::action::Action;
use crate::key_state::{InputSource, KeyState};

/// Opacity of a region that is not being touched.
pub const RELEASED_OPACITY: f32 = 1.0;

/// How a touch on a region ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    End,
    /// Interrupted by the system (incoming call, edge gesture). Handled like `End`.
    Cancel,
}

/// Effect of one activate/deactivate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionChange {
    Pressed,
    Released,
    Unchanged,
}

/// One on-screen touch target. `pressed` drives visual feedback only; the
/// authoritative state lives in [`KeyState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRegion {
    pub action: Action,
    pub pressed: bool,
    /// False when the page had no element for this region. Unwired regions
    /// never press.
    pub wired: bool,
}

impl ControlRegion {
    fn new(action: Action) -> Self {
        Self {
            action,
            pressed: false,
            wired: true,
        }
    }
}

/// Translates region touches into `Touch`-source assertions on the key state.
pub struct InputBridge {
    regions: [ControlRegion; 5],
    pressed_opacity: f32,
}

impl InputBridge {
    pub fn new(pressed_opacity: f32) -> Self {
        Self {
            regions: Action::ALL.map(ControlRegion::new),
            pressed_opacity,
        }
    }

    pub fn region(&self, action: Action) -> &ControlRegion {
        &self.regions[action.index()]
    }

    pub fn regions(&self) -> &[ControlRegion] {
        &self.regions
    }

    /// Opacity the region should currently be drawn with.
    pub fn opacity(&self, action: Action) -> f32 {
        if self.region(action).pressed {
            self.pressed_opacity
        } else {
            RELEASED_OPACITY
        }
    }

    /// Record that the page has no element for `action`. A held region is
    /// released first so none of its flags stay asserted.
    pub fn mark_unwired(&mut self, action: Action, keys: &mut KeyState) {
        self.deactivate(action, Release::Cancel, keys);
        self.regions[action.index()].wired = false;
        log::warn!("{} control has no target element; touches on it are ignored", action.label());
    }

    /// Touch began inside the region.
    pub fn activate(&mut self, action: Action, keys: &mut KeyState) -> RegionChange {
        let region = &mut self.regions[action.index()];
        if region.pressed || !region.wired {
            return RegionChange::Unchanged;
        }
        region.pressed = true;
        for flag in action.flags() {
            keys.set(InputSource::Touch, *flag);
        }
        log::debug!("{action:?} pressed");
        RegionChange::Pressed
    }

    /// Touch ended or was cancelled.
    pub fn deactivate(&mut self, action: Action, release: Release, keys: &mut KeyState) -> RegionChange {
        let region = &mut self.regions[action.index()];
        if !region.pressed {
            return RegionChange::Unchanged;
        }
        region.pressed = false;
        for flag in action.flags() {
            keys.clear(InputSource::Touch, *flag);
        }
        log::debug!("{action:?} released ({release:?})");
        RegionChange::Released
    }
}

impl Default for InputBridge {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::KeyFlag;

    fn held(keys: &KeyState) -> Vec<KeyFlag> {
        keys.snapshot().held_flags().collect()
    }

    #[test]
    fn test_activate_sets_exactly_region_flags() {
        for action in Action::ALL {
            let mut bridge = InputBridge::default();
            let mut keys = KeyState::new();
            assert_eq!(bridge.activate(action, &mut keys), RegionChange::Pressed);
            assert_eq!(held(&keys), action.flags().to_vec(), "{action:?}");
        }
    }

    #[test]
    fn test_double_activate_is_idempotent() {
        let mut bridge = InputBridge::default();
        let mut keys = KeyState::new();
        bridge.activate(Action::MoveLeft, &mut keys);
        let before = keys.snapshot();
        assert_eq!(bridge.activate(Action::MoveLeft, &mut keys), RegionChange::Unchanged);
        assert_eq!(keys.snapshot(), before);
        assert!(bridge.region(Action::MoveLeft).pressed);

        // A single release still frees it.
        bridge.deactivate(Action::MoveLeft, Release::End, &mut keys);
        assert!(!keys.any_held());
    }

    #[test]
    fn test_cancel_matches_end() {
        for action in Action::ALL {
            let mut ended = (InputBridge::default(), KeyState::new());
            let mut cancelled = (InputBridge::default(), KeyState::new());

            ended.0.activate(action, &mut ended.1);
            cancelled.0.activate(action, &mut cancelled.1);
            let a = ended.0.deactivate(action, Release::End, &mut ended.1);
            let b = cancelled.0.deactivate(action, Release::Cancel, &mut cancelled.1);

            assert_eq!(a, b);
            assert_eq!(ended.1.snapshot(), cancelled.1.snapshot());
            assert!(!cancelled.1.any_held());
            assert_eq!(ended.0.region(action), cancelled.0.region(action));
        }
    }

    #[test]
    fn test_release_of_idle_region_is_noop() {
        let mut bridge = InputBridge::default();
        let mut keys = KeyState::new();
        keys.set(InputSource::Touch, KeyFlag::Space);
        assert_eq!(
            bridge.deactivate(Action::Fire, Release::End, &mut keys),
            RegionChange::Unchanged
        );
        assert!(keys.is_held(KeyFlag::Space));
    }

    #[test]
    fn test_release_keeps_keyboard_hold() {
        let mut bridge = InputBridge::default();
        let mut keys = KeyState::new();
        keys.set(InputSource::Keyboard, KeyFlag::ArrowUp);

        bridge.activate(Action::MoveUp, &mut keys);
        bridge.deactivate(Action::MoveUp, Release::End, &mut keys);

        assert!(keys.is_held(KeyFlag::ArrowUp));
        assert!(!keys.is_held(KeyFlag::W));
    }

    #[test]
    fn test_unwired_region_never_presses() {
        let mut bridge = InputBridge::default();
        let mut keys = KeyState::new();
        bridge.mark_unwired(Action::Fire, &mut keys);

        assert!(!bridge.region(Action::Fire).wired);
        assert_eq!(bridge.activate(Action::Fire, &mut keys), RegionChange::Unchanged);
        assert!(!keys.any_held());
        assert_eq!(bridge.opacity(Action::Fire), RELEASED_OPACITY);

        assert_eq!(bridge.activate(Action::MoveUp, &mut keys), RegionChange::Pressed);
        assert_eq!(held(&keys), Action::MoveUp.flags().to_vec());
    }

    #[test]
    fn test_unwiring_held_region_releases_it() {
        let mut bridge = InputBridge::default();
        let mut keys = KeyState::new();
        bridge.activate(Action::MoveLeft, &mut keys);
        bridge.mark_unwired(Action::MoveLeft, &mut keys);
        assert!(!bridge.region(Action::MoveLeft).pressed);
        assert!(!keys.any_held());
    }

    #[test]
    fn test_independent_regions() {
        let mut bridge = InputBridge::default();
        let mut keys = KeyState::new();
        bridge.activate(Action::MoveRight, &mut keys);
        bridge.activate(Action::Fire, &mut keys);
        bridge.deactivate(Action::MoveRight, Release::Cancel, &mut keys);
        assert_eq!(held(&keys), vec![KeyFlag::Space]);
    }

    #[test]
    fn test_opacity_follows_pressed_state() {
        let mut bridge = InputBridge::new(0.5);
        let mut keys = KeyState::new();
        assert_eq!(bridge.opacity(Action::Fire), RELEASED_OPACITY);
        bridge.activate(Action::Fire, &mut keys);
        assert_eq!(bridge.opacity(Action::Fire), 0.5);
        bridge.deactivate(Action::Fire, Release::End, &mut keys);
        assert_eq!(bridge.opacity(Action::Fire), RELEASED_OPACITY);
    }
}
