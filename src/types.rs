//! Core geometry and view-mode types

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::validation::MAX_DIMENSION;

/// Which of the two mutually exclusive views is on screen.
/// Never persisted: every run starts in `Setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Setup,
    Timer,
}

/// Window size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Replace zero axes with `fallback` and clamp oversized axes.
    /// Persisted values come from a hand-editable file.
    pub fn validated(self, fallback: Size) -> Self {
        let axis = |value: u32, default: u32, name: &str| {
            if value == 0 {
                warn!(axis = name, using = default, "persisted dimension is zero, using default");
                default
            } else if value > MAX_DIMENSION {
                warn!(axis = name, value, max = MAX_DIMENSION, "persisted dimension exceeds maximum, clamping");
                MAX_DIMENSION
            } else {
                value
            }
        };
        Self {
            width: axis(self.width, fallback.width, "width"),
            height: axis(self.height, fallback.height, "height"),
        }
    }

    /// Clamp into `[min, max]`; `max = None` means unbounded
    pub fn clamp(self, min: Size, max: Option<Size>) -> Self {
        let mut width = self.width.max(min.width);
        let mut height = self.height.max(min.height);
        if let Some(max) = max {
            width = width.min(max.width);
            height = height.min(max.height);
        }
        Self { width, height }
    }
}

/// Screen position of the window's outer top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Optional size override carried by a switch-to-timer request.
/// Each axis falls back independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
