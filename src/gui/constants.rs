//! GUI-specific constants for layout and colors

/// Layout spacing
pub const PADDING: f32 = 12.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Height of the draggable strip at the top of the frameless window
pub const DRAG_STRIP_HEIGHT: f32 = 28.0;

/// Side of the square resize grip in the bottom-right corner
pub const RESIZE_GRIP_SIZE: f32 = 14.0;

/// Panel colors
pub const SETUP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(28, 30, 36);
pub const TIMER_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(16, 18, 22);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(230, 120, 60);

/// Corner radius of the panel frame
pub const CORNER_RADIUS: u8 = 10;

/// Font size of the alarm time in the timer view
pub const TIMER_FONT_SIZE: f32 = 42.0;
