//! View-mode coordinator
//!
//! Owns the active `ViewMode` and the window handle. Mode switches reapply the
//! window profile for that mode; resize and move events are routed to the
//! store key belonging to whichever mode is active when they arrive.

use tracing::{debug, error, info};

use crate::config::{SettingsStore, SettingsStoreExt};
use crate::constants::{keys, setup, timer};
use crate::types::{Position, Size, TimerConfig, ViewMode};
use crate::window::WindowController;

/// Bounds and stacking behavior the host window gets in one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProfile {
    pub default_size: Size,
    pub min_size: Size,
    pub max_size: Option<Size>,
    pub always_on_top: bool,
    pub size_key: &'static str,
}

impl WindowProfile {
    pub const SETUP: WindowProfile = WindowProfile {
        default_size: Size::new(setup::DEFAULT_WIDTH, setup::DEFAULT_HEIGHT),
        min_size: Size::new(setup::MIN_WIDTH, setup::MIN_HEIGHT),
        max_size: Some(Size::new(setup::MAX_WIDTH, setup::MAX_HEIGHT)),
        always_on_top: false,
        size_key: keys::SETUP_WINDOW_SIZE,
    };

    pub const TIMER: WindowProfile = WindowProfile {
        default_size: Size::new(timer::DEFAULT_WIDTH, timer::DEFAULT_HEIGHT),
        min_size: Size::new(timer::MIN_WIDTH, timer::MIN_HEIGHT),
        max_size: None,
        always_on_top: true,
        size_key: keys::TIMER_WINDOW_SIZE,
    };

    pub fn for_mode(mode: ViewMode) -> &'static WindowProfile {
        match mode {
            ViewMode::Setup => &Self::SETUP,
            ViewMode::Timer => &Self::TIMER,
        }
    }

    /// Last persisted size for this mode, else the default
    pub fn stored_size<S: SettingsStore + ?Sized>(&self, store: &S) -> Size {
        store
            .get::<Size>(self.size_key)
            .map(|size| size.validated(self.default_size))
            .unwrap_or(self.default_size)
    }
}

pub struct ViewModeCoordinator<W: WindowController> {
    mode: ViewMode,
    window: Option<W>,
}

impl<W: WindowController> ViewModeCoordinator<W> {
    pub fn new(window: W) -> Self {
        Self {
            mode: ViewMode::Setup,
            window: Some(window),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    pub fn window_mut(&mut self) -> Option<&mut W> {
        self.window.as_mut()
    }

    /// Forget the window after the host destroyed it; later calls no-op
    pub fn detach_window(&mut self) -> Option<W> {
        info!("Window closed, detaching from coordinator");
        self.window.take()
    }

    /// Window usable for reconfiguration, if any
    fn live_window<S: SettingsStore + ?Sized>(&mut self, store: &S) -> Option<&mut W> {
        if !store.is_available() {
            debug!("Settings store unavailable, skipping");
            return None;
        }
        match self.window.as_mut() {
            Some(window) if window.is_alive() => Some(window),
            _ => {
                debug!("No live window, skipping");
                None
            }
        }
    }

    /// Window usable for geometry read-back: live and not minimized
    fn trackable_window<S: SettingsStore + ?Sized>(&self, store: &S) -> Option<&W> {
        if !store.is_available() {
            return None;
        }
        self.window
            .as_ref()
            .filter(|window| window.is_alive() && !window.is_minimized())
    }

    /// Switch to the small always-on-top countdown profile
    pub fn enter_timer_mode<S: SettingsStore + ?Sized>(&mut self, store: &S, config: TimerConfig) {
        let profile = &WindowProfile::TIMER;
        let stored = profile.stored_size(store);
        let Some(window) = self.live_window(store) else {
            return;
        };

        // Zero counts as "not given"
        let size = Size::new(
            config.width.filter(|w| *w > 0).unwrap_or(stored.width),
            config.height.filter(|h| *h > 0).unwrap_or(stored.height),
        );

        window.set_min_size(profile.min_size);
        window.set_max_size(profile.max_size);
        window.set_always_on_top(profile.always_on_top);
        window.set_resizable(true);
        window.set_size(size);
        window.set_opacity(1.0);

        self.mode = ViewMode::Timer;
        info!(width = size.width, height = size.height, "Entered timer mode");
    }

    /// Switch back to the bounded configuration profile and re-center
    pub fn enter_setup_mode<S: SettingsStore + ?Sized>(&mut self, store: &S) {
        let profile = &WindowProfile::SETUP;
        let size = profile.stored_size(store);
        let Some(window) = self.live_window(store) else {
            return;
        };

        window.set_min_size(profile.min_size);
        window.set_max_size(profile.max_size);
        window.set_always_on_top(profile.always_on_top);
        window.set_resizable(true);
        window.set_size(size);
        window.set_opacity(1.0);
        window.center();

        self.mode = ViewMode::Setup;
        info!(width = size.width, height = size.height, "Entered setup mode");
    }

    /// Persist the live size under the active mode's key
    pub fn on_resize<S: SettingsStore + ?Sized>(&mut self, store: &mut S) {
        let Some(window) = self.trackable_window(store) else {
            return;
        };
        let size = window.size();
        let key = WindowProfile::for_mode(self.mode).size_key;

        match store.set(key, &size) {
            Ok(()) => debug!(key, width = size.width, height = size.height, "Saved window size"),
            Err(e) => error!(key, error = %e, "Failed to save window size"),
        }
    }

    /// Persist the live position; only the setup view's placement is kept
    pub fn on_move<S: SettingsStore + ?Sized>(&mut self, store: &mut S) {
        if self.mode == ViewMode::Timer {
            return;
        }
        let Some(window) = self.trackable_window(store) else {
            return;
        };
        let position: Position = window.position();

        match store.set(keys::SETUP_WINDOW_POSITION, &position) {
            Ok(()) => debug!(x = position.x, y = position.y, "Saved setup window position"),
            Err(e) => error!(error = %e, "Failed to save setup window position"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use crate::window::fake::FakeWindow;

    fn setup() -> (ViewModeCoordinator<FakeWindow>, MemoryStore) {
        let store = MemoryStore::new();
        let coordinator = ViewModeCoordinator::new(FakeWindow::new(Size::new(460, 740)));
        (coordinator, store)
    }

    fn window(coordinator: &mut ViewModeCoordinator<FakeWindow>) -> &mut FakeWindow {
        coordinator.window_mut().unwrap()
    }

    fn stored_size(store: &MemoryStore, key: &str) -> Option<Size> {
        store.get::<Size>(key)
    }

    #[test]
    fn test_starts_in_setup_mode() {
        let (coordinator, _) = setup();
        assert_eq!(coordinator.mode(), ViewMode::Setup);
    }

    #[test]
    fn test_enter_timer_mode_applies_profile() {
        let (mut coordinator, store) = setup();
        window(&mut coordinator).position = Position::new(300, 200);
        window(&mut coordinator).opacity = 0.4;

        coordinator.enter_timer_mode(&store, TimerConfig::default());

        let w = coordinator.window().unwrap();
        assert_eq!(coordinator.mode(), ViewMode::Timer);
        assert_eq!(w.size, Size::new(320, 150));
        assert_eq!(w.min_size, Size::new(100, 50));
        assert_eq!(w.max_size, None);
        assert!(w.always_on_top);
        assert!(w.resizable);
        assert_eq!(w.opacity, 1.0);
        // Position untouched
        assert_eq!(w.position, Position::new(300, 200));
        assert_eq!(w.center_calls, 0);
    }

    #[test]
    fn test_enter_timer_mode_prefers_config_then_stored() {
        let (mut coordinator, mut store) = setup();
        store.set(keys::TIMER_WINDOW_SIZE, &Size::new(400, 180)).unwrap();

        coordinator.enter_timer_mode(&store, TimerConfig { width: Some(350), height: None });

        assert_eq!(coordinator.window().unwrap().size, Size::new(350, 180));
    }

    #[test]
    fn test_enter_timer_mode_without_any_timer_size_uses_default() {
        let mut coordinator = ViewModeCoordinator::new(FakeWindow::new(Size::new(460, 740)));
        let store = MemoryStore::empty();

        coordinator.enter_timer_mode(&store, TimerConfig::default());

        assert_eq!(coordinator.window().unwrap().size, Size::new(320, 150));
    }

    #[test]
    fn test_enter_timer_mode_twice_is_idempotent() {
        let (mut coordinator, store) = setup();

        coordinator.enter_timer_mode(&store, TimerConfig::default());
        let first = coordinator.window().unwrap().clone();
        coordinator.enter_timer_mode(&store, TimerConfig::default());
        let second = coordinator.window().unwrap();

        assert_eq!(first.size, second.size);
        assert_eq!(first.min_size, second.min_size);
        assert_eq!(first.max_size, second.max_size);
        assert_eq!(first.always_on_top, second.always_on_top);
        assert_eq!(first.position, second.position);
        assert_eq!(coordinator.mode(), ViewMode::Timer);
    }

    #[test]
    fn test_enter_timer_then_resize_persists_timer_size_only() {
        let (mut coordinator, mut store) = setup();

        coordinator.enter_timer_mode(&store, TimerConfig::default());
        coordinator.on_resize(&mut store);

        assert_eq!(stored_size(&store, keys::TIMER_WINDOW_SIZE), Some(Size::new(320, 150)));
        assert_eq!(stored_size(&store, keys::SETUP_WINDOW_SIZE), Some(Size::new(460, 740)));
        assert_eq!(store.get::<Position>(keys::SETUP_WINDOW_POSITION), None);
    }

    #[test]
    fn test_timer_resizes_never_touch_setup_size() {
        let (mut coordinator, mut store) = setup();
        coordinator.enter_timer_mode(&store, TimerConfig::default());

        for size in [Size::new(200, 90), Size::new(640, 300), Size::new(1200, 80)] {
            window(&mut coordinator).user_resize(size);
            coordinator.on_resize(&mut store);
            assert_eq!(stored_size(&store, keys::TIMER_WINDOW_SIZE), Some(size));
            assert_eq!(stored_size(&store, keys::SETUP_WINDOW_SIZE), Some(Size::new(460, 740)));
        }
    }

    #[test]
    fn test_setup_resizes_never_touch_timer_size() {
        let (mut coordinator, mut store) = setup();
        coordinator.enter_setup_mode(&store);

        for size in [Size::new(410, 750), Size::new(480, 780)] {
            window(&mut coordinator).user_resize(size);
            coordinator.on_resize(&mut store);
            assert_eq!(stored_size(&store, keys::SETUP_WINDOW_SIZE), Some(size));
            assert_eq!(stored_size(&store, keys::TIMER_WINDOW_SIZE), Some(Size::new(320, 150)));
        }
    }

    #[test]
    fn test_resize_persists_clamped_live_size() {
        let (mut coordinator, mut store) = setup();
        coordinator.enter_setup_mode(&store);

        // Requested 1000x100, host clamps into the setup bounds
        window(&mut coordinator).user_resize(Size::new(1000, 100));
        coordinator.on_resize(&mut store);

        assert_eq!(stored_size(&store, keys::SETUP_WINDOW_SIZE), Some(Size::new(480, 740)));
    }

    #[test]
    fn test_move_in_timer_mode_does_not_touch_setup_position() {
        let (mut coordinator, mut store) = setup();
        window(&mut coordinator).user_move(Position::new(50, 60));
        coordinator.on_move(&mut store);

        coordinator.enter_timer_mode(&store, TimerConfig::default());
        window(&mut coordinator).user_move(Position::new(900, 10));
        coordinator.on_move(&mut store);

        assert_eq!(store.get::<Position>(keys::SETUP_WINDOW_POSITION), Some(Position::new(50, 60)));
    }

    #[test]
    fn test_move_in_setup_mode_records_position() {
        let (mut coordinator, mut store) = setup();
        window(&mut coordinator).user_move(Position::new(-20, 35));

        coordinator.on_move(&mut store);

        assert_eq!(store.get::<Position>(keys::SETUP_WINDOW_POSITION), Some(Position::new(-20, 35)));
    }

    #[test]
    fn test_enter_setup_mode_recenters_and_restores_opacity() {
        let (mut coordinator, store) = setup();
        coordinator.enter_timer_mode(&store, TimerConfig::default());
        window(&mut coordinator).opacity = 0.3;
        window(&mut coordinator).user_move(Position::new(5, 5));

        coordinator.enter_setup_mode(&store);

        let w = coordinator.window().unwrap();
        assert_eq!(coordinator.mode(), ViewMode::Setup);
        assert_eq!(w.opacity, 1.0);
        assert_eq!(w.center_calls, 1);
        assert_eq!(w.position, Position::new((1920 - 460) / 2, (1080 - 740) / 2));
        assert_eq!(w.min_size, Size::new(400, 740));
        assert_eq!(w.max_size, Some(Size::new(480, 780)));
        assert!(!w.always_on_top);
        assert!(w.resizable);
    }

    #[test]
    fn test_enter_setup_mode_restores_persisted_setup_size() {
        let (mut coordinator, mut store) = setup();
        window(&mut coordinator).user_resize(Size::new(420, 770));
        coordinator.on_resize(&mut store);

        coordinator.enter_timer_mode(&store, TimerConfig::default());
        coordinator.on_resize(&mut store);
        coordinator.enter_setup_mode(&store);

        assert_eq!(coordinator.window().unwrap().size, Size::new(420, 770));
    }

    #[test]
    fn test_minimized_window_is_not_tracked() {
        let (mut coordinator, mut store) = setup();
        window(&mut coordinator).minimized = true;
        window(&mut coordinator).user_resize(Size::new(410, 760));
        window(&mut coordinator).user_move(Position::new(1, 1));

        coordinator.on_resize(&mut store);
        coordinator.on_move(&mut store);

        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_dead_window_makes_everything_noop() {
        let (mut coordinator, mut store) = setup();
        window(&mut coordinator).alive = false;

        coordinator.enter_timer_mode(&store, TimerConfig::default());
        coordinator.on_resize(&mut store);

        assert_eq!(coordinator.mode(), ViewMode::Setup);
        assert_eq!(coordinator.window().unwrap().size, Size::new(460, 740));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_detached_window_makes_everything_noop() {
        let (mut coordinator, mut store) = setup();
        assert!(coordinator.detach_window().is_some());

        coordinator.enter_timer_mode(&store, TimerConfig::default());
        coordinator.enter_setup_mode(&store);
        coordinator.on_resize(&mut store);
        coordinator.on_move(&mut store);

        assert_eq!(coordinator.mode(), ViewMode::Setup);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_unavailable_store_makes_mode_switch_noop() {
        let (mut coordinator, mut store) = setup();
        store.set_available(false);

        coordinator.enter_timer_mode(&store, TimerConfig::default());

        assert_eq!(coordinator.mode(), ViewMode::Setup);
        assert!(!coordinator.window().unwrap().always_on_top);
    }

    #[test]
    fn test_stored_size_falls_back_on_zero_axes() {
        let mut store = MemoryStore::new();
        store.set(keys::SETUP_WINDOW_SIZE, &Size::new(0, 0)).unwrap();
        assert_eq!(WindowProfile::SETUP.stored_size(&store), Size::new(460, 740));
    }
}
