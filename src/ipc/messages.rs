//! Signal types for front end ↔ host communication

use serde::{Deserialize, Serialize};

use crate::config::{AppSettings, AppSettingsPatch};
use crate::types::TimerConfig;

/// Requests sent from the front end to the host
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "signal", content = "payload", rename_all = "kebab-case")]
pub enum InboundSignal {
    /// Shrink into the always-on-top countdown window; payload may be null
    SwitchToTimer(Option<TimerConfig>),

    /// Return to the configuration window
    SwitchToSetup,

    /// Alarm went off
    FireNotification { title: String, body: String },

    /// Merge these fields into the stored settings
    PersistSettings(AppSettingsPatch),

    RequestQuit,
}

/// Messages sent from the host to the front end
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "signal", content = "payload", rename_all = "kebab-case")]
pub enum OutboundSignal {
    /// Full stored settings, sent once when the window is ready
    LoadSettings(AppSettings),
}
