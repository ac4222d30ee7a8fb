use crate::error::PlatformError;

/// Fullscreen entry points on the game container, in probe order.
pub const ENTER_METHODS: [&str; 4] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "mozRequestFullScreen",
    "msRequestFullscreen",
];

/// Fullscreen exit points on the document, in probe order.
pub const EXIT_METHODS: [&str; 4] = [
    "exitFullscreen",
    "webkitExitFullscreen",
    "mozCancelFullScreen",
    "msExitFullscreen",
];

/// Document properties holding the current fullscreen element.
pub const FULLSCREEN_ELEMENT_PROPERTIES: [&str; 4] = [
    "fullscreenElement",
    "webkitFullscreenElement",
    "mozFullScreenElement",
    "msFullscreenElement",
];

/// Value passed to `screen.orientation.lock`.
pub const LANDSCAPE_LOCK: &str = "landscape";

/// Browser fullscreen and orientation-lock APIs, probed by name.
pub trait FullscreenPlatform {
    fn is_fullscreen(&self) -> bool;

    /// Call `method` on the game container. `Err(Missing)` if it doesn't exist.
    fn request_fullscreen(&mut self, method: &str) -> Result<(), PlatformError>;

    /// Call `method` on the document. `Err(Missing)` if it doesn't exist.
    fn exit_fullscreen(&mut self, method: &str) -> Result<(), PlatformError>;

    /// Best-effort orientation lock. Asynchronous rejections are the
    /// platform's to log.
    fn lock_orientation(&mut self, orientation: &str) -> Result<(), PlatformError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Entered { method: &'static str },
    Exited { method: &'static str },
    /// No entry point answered.
    Unsupported,
}

/// Stateless fullscreen toggle. Every call re-reads the platform, so an exit
/// through browser UI is picked up on the next toggle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullscreenController;

impl FullscreenController {
    pub fn new() -> Self {
        Self
    }

    pub fn toggle<P: FullscreenPlatform + ?Sized>(&self, platform: &mut P) -> ToggleOutcome {
        if platform.is_fullscreen() {
            return match first_available(&EXIT_METHODS, |m| platform.exit_fullscreen(m)) {
                Some(method) => ToggleOutcome::Exited { method },
                None => ToggleOutcome::Unsupported,
            };
        }

        let entered = first_available(&ENTER_METHODS, |m| platform.request_fullscreen(m));

        // The lock is attempted even without a fullscreen API; some browsers
        // allow it on its own.
        if let Err(err) = platform.lock_orientation(LANDSCAPE_LOCK) {
            log::warn!("Orientation lock unavailable: {err}");
        }

        match entered {
            Some(method) => ToggleOutcome::Entered { method },
            None => ToggleOutcome::Unsupported,
        }
    }
}

/// Try each method until one exists. A method that exists but rejects still
/// counts as the one used; the request was made.
fn first_available(
    methods: &[&'static str],
    mut call: impl FnMut(&str) -> Result<(), PlatformError>,
) -> Option<&'static str> {
    for &method in methods {
        match call(method) {
            Ok(()) => return Some(method),
            Err(err) if err.is_missing() => continue,
            Err(err) => {
                log::warn!("Fullscreen request failed: {err}");
                return Some(method);
            }
        }
    }
    log::warn!("No fullscreen API available (tried {})", methods.join(", "));
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFullscreen;

    #[test]
    fn test_enter_uses_standard_api_first() {
        let mut platform = FakeFullscreen::standard();
        let outcome = FullscreenController::new().toggle(&mut platform);
        assert_eq!(outcome, ToggleOutcome::Entered { method: "requestFullscreen" });
        assert!(platform.fullscreen);
        assert_eq!(platform.locks, vec![LANDSCAPE_LOCK.to_string()]);
    }

    #[test]
    fn test_enter_falls_back_to_prefixed_api() {
        let mut platform = FakeFullscreen::with_methods(&["webkitRequestFullscreen", "webkitExitFullscreen"]);
        let outcome = FullscreenController::new().toggle(&mut platform);
        assert_eq!(outcome, ToggleOutcome::Entered { method: "webkitRequestFullscreen" });

        let outcome = FullscreenController::new().toggle(&mut platform);
        assert_eq!(outcome, ToggleOutcome::Exited { method: "webkitExitFullscreen" });
        assert!(!platform.fullscreen);
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut platform = FakeFullscreen::standard();
        let controller = FullscreenController::new();
        controller.toggle(&mut platform);
        controller.toggle(&mut platform);
        assert!(!platform.fullscreen);
        assert_eq!(platform.calls, vec!["requestFullscreen", "exitFullscreen"]);
    }

    #[test]
    fn test_external_exit_requests_entry_again() {
        let mut platform = FakeFullscreen::standard();
        let controller = FullscreenController::new();
        controller.toggle(&mut platform);

        // User swiped out through browser UI.
        platform.fullscreen = false;

        let outcome = controller.toggle(&mut platform);
        assert!(matches!(outcome, ToggleOutcome::Entered { .. }));
        assert!(platform.fullscreen);
    }

    #[test]
    fn test_lock_rejection_is_swallowed() {
        let mut platform = FakeFullscreen::standard();
        platform.lock_error = Some(PlatformError::rejected("screen.orientation.lock", "NotSupportedError"));
        let outcome = FullscreenController::new().toggle(&mut platform);
        assert_eq!(outcome, ToggleOutcome::Entered { method: "requestFullscreen" });
        assert!(platform.fullscreen);
    }

    #[test]
    fn test_no_api_is_unsupported() {
        let mut platform = FakeFullscreen::with_methods(&[]);
        assert_eq!(FullscreenController::new().toggle(&mut platform), ToggleOutcome::Unsupported);
        assert!(!platform.fullscreen);
    }

    #[test]
    fn test_lock_attempted_without_fullscreen_api() {
        let mut platform = FakeFullscreen::with_methods(&[]);
        let outcome = FullscreenController::new().toggle(&mut platform);
        assert_eq!(outcome, ToggleOutcome::Unsupported);
        assert_eq!(platform.locks, vec![LANDSCAPE_LOCK.to_string()]);
    }

    #[test]
    fn test_exit_does_not_lock() {
        let mut platform = FakeFullscreen::standard();
        platform.fullscreen = true;
        FullscreenController::new().toggle(&mut platform);
        assert!(platform.locks.is_empty());
    }
}
