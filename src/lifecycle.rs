//! Startup, signal dispatch and shutdown around the coordinator
//!
//! `Shell` owns everything a running instance needs: the coordinator (and
//! through it the window), the settings store and the notifier. The host
//! adapter feeds it window events and front-end signals one at a time.

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::config::{AppSettings, AppSettingsPatch, SettingsStore, SettingsStoreExt};
use crate::constants::keys;
use crate::coordinator::{ViewModeCoordinator, WindowProfile};
use crate::ipc::{InboundSignal, OutboundSignal};
use crate::notify::{self, NotificationEmitter};
use crate::types::{Position, Size, ViewMode};
use crate::window::WindowController;

/// What the host should create before the first frame
#[derive(Debug, Clone, PartialEq)]
pub struct StartupState {
    pub setup_size: Size,
    /// `None` means center once the window is shown
    pub setup_position: Option<Position>,
    pub settings: Option<AppSettings>,
}

impl StartupState {
    pub fn load(store: &dyn SettingsStore) -> Self {
        let setup_size = WindowProfile::SETUP.stored_size(store);
        let setup_position = store.get::<Position>(keys::SETUP_WINDOW_POSITION);
        let settings = store.get::<AppSettings>(keys::APP_SETTINGS);

        info!(
            width = setup_size.width,
            height = setup_size.height,
            position = ?setup_position,
            has_settings = settings.is_some(),
            "Loaded startup state"
        );

        Self {
            setup_size,
            setup_position,
            settings,
        }
    }
}

fn default_record() -> Map<String, Value> {
    match serde_json::to_value(AppSettings::default()) {
        Ok(Value::Object(record)) => record,
        _ => Map::new(),
    }
}

/// Whether the host should keep running after a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: WindowController, N: NotificationEmitter> {
    coordinator: ViewModeCoordinator<W>,
    store: Box<dyn SettingsStore>,
    notifier: N,
    startup: StartupState,
    ready: bool,
}

impl<W: WindowController, N: NotificationEmitter> Shell<W, N> {
    /// `window` must already be created from `startup`
    pub fn new(window: W, store: Box<dyn SettingsStore>, notifier: N, startup: StartupState) -> Self {
        Self {
            coordinator: ViewModeCoordinator::new(window),
            store,
            notifier,
            startup,
            ready: false,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.coordinator.mode()
    }

    pub fn coordinator(&self) -> &ViewModeCoordinator<W> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut ViewModeCoordinator<W> {
        &mut self.coordinator
    }

    pub fn store(&self) -> &dyn SettingsStore {
        &*self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// First paint: show, center if no placement was stored, and hand the
    /// stored settings to the front end. Only the first call does anything.
    pub fn on_ready(&mut self) -> Option<OutboundSignal> {
        if self.ready {
            return None;
        }
        self.ready = true;

        if let Some(window) = self.coordinator.window_mut().filter(|w| w.is_alive()) {
            window.show();
            if self.startup.setup_position.is_none() {
                debug!("No stored setup position, centering");
                window.center();
            }
        }

        self.startup.settings.clone().map(OutboundSignal::LoadSettings)
    }

    pub fn on_resize(&mut self) {
        self.coordinator.on_resize(&mut *self.store);
    }

    pub fn on_move(&mut self) {
        self.coordinator.on_move(&mut *self.store);
    }

    /// The host destroyed the window; nothing is left to show
    pub fn on_window_closed(&mut self) -> Flow {
        self.coordinator.detach_window();
        Flow::Quit
    }

    pub fn handle(&mut self, signal: InboundSignal) -> Flow {
        debug!(signal = signal.name(), "Handling signal");
        match signal {
            InboundSignal::SwitchToTimer(config) => {
                self.coordinator
                    .enter_timer_mode(&*self.store, config.unwrap_or_default());
            }
            InboundSignal::SwitchToSetup => {
                self.coordinator.enter_setup_mode(&*self.store);
            }
            InboundSignal::FireNotification { title, body } => {
                notify::dispatch(&mut self.notifier, &title, &body);
            }
            InboundSignal::PersistSettings(patch) => {
                self.persist_settings(patch);
            }
            InboundSignal::RequestQuit => {
                info!("Quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Shallow-merge `patch` into the stored settings and write immediately
    fn persist_settings(&mut self, patch: AppSettingsPatch) {
        if !self.store.is_available() {
            debug!("Settings store unavailable, dropping settings save");
            return;
        }
        if patch.is_empty() {
            debug!("Empty settings save, nothing to merge");
            return;
        }

        // Merge onto the raw record so fields this build does not model survive
        let mut record = match self.store.get_value(keys::APP_SETTINGS) {
            Some(Value::Object(record)) => record,
            Some(other) => {
                warn!(value = %other, "Stored settings are not an object, starting from defaults");
                default_record()
            }
            None => default_record(),
        };
        if let Err(e) = patch.merge_into(&mut record) {
            error!(error = %e, "Failed to encode settings save");
            return;
        }

        let record = Value::Object(record);
        match self.store.set_value(keys::APP_SETTINGS, record.clone()) {
            Ok(()) => info!(settings = %record, "Settings saved"),
            Err(e) => error!(error = %e, "Failed to save settings"),
        }
    }
}
