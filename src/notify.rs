//! Desktop notification dispatch for fired alarms

use notify_rust::Notification;
use tracing::{debug, warn};

use crate::constants::{app, notification};

/// Host capability to show a transient system notification
pub trait NotificationEmitter {
    fn is_supported(&self) -> bool;

    /// Fire-and-forget: failures are logged, never returned
    fn show(&mut self, title: &str, body: &str);
}

/// notify-rust backed emitter (D-Bus on Linux/BSD, native on macOS/Windows)
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationEmitter for DesktopNotifier {
    fn is_supported(&self) -> bool {
        cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly",
            target_os = "macos",
            target_os = "windows"
        ))
    }

    fn show(&mut self, title: &str, body: &str) {
        debug!(title, "Showing alarm notification");
        if let Err(e) = Notification::new()
            .summary(title)
            .body(body)
            .appname(app::NAME)
            .icon(notification::ICON)
            .show()
        {
            warn!(error = %e, "Failed to show notification, dropping it");
        }
    }
}

/// Show `title`/`body` if the host can, otherwise drop it silently
pub fn dispatch(emitter: &mut dyn NotificationEmitter, title: &str, body: &str) {
    if !emitter.is_supported() {
        debug!(title, "Notifications unsupported on this host, dropping");
        return;
    }
    emitter.show(title, body);
}
