//! Host window handle abstraction
//!
//! The coordinator drives the window only through `WindowController`, so the
//! same logic runs against the eframe viewport and against `FakeWindow` in tests.

use crate::types::{Position, Size};

pub trait WindowController {
    /// False once the host window has been destroyed
    fn is_alive(&self) -> bool;
    fn is_minimized(&self) -> bool;

    /// Live inner size as the host reports it
    fn size(&self) -> Size;
    /// Live outer position as the host reports it
    fn position(&self) -> Position;

    fn set_size(&mut self, size: Size);
    fn set_min_size(&mut self, size: Size);
    /// `None` removes the constraint
    fn set_max_size(&mut self, size: Option<Size>);
    fn set_always_on_top(&mut self, on_top: bool);
    fn set_resizable(&mut self, resizable: bool);
    /// 0.0 (invisible) to 1.0 (opaque)
    fn set_opacity(&mut self, opacity: f32);
    /// Center on the display the window currently occupies
    fn center(&mut self);
    /// Make a window created hidden visible
    fn show(&mut self);
}
