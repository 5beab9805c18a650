//! `WindowController` over the eframe root viewport
//!
//! Writes become `egui::ViewportCommand`s, which winit applies between
//! frames; reads come from the viewport info egui fills in every frame, so
//! they always reflect what the window manager actually granted.

use eframe::egui;
use tracing::debug;

use crate::constants::validation::MAX_DIMENSION;
use crate::types::{Position, Size};
use crate::window::WindowController;

pub struct EguiWindow {
    ctx: egui::Context,
    requested_size: Size,
    last_position: Position,
    opacity: f32,
    pending_center: bool,
}

fn to_vec2(size: Size) -> egui::Vec2 {
    egui::vec2(size.width as f32, size.height as f32)
}

impl EguiWindow {
    pub fn new(ctx: egui::Context, initial_size: Size, initial_position: Option<Position>) -> Self {
        Self {
            ctx,
            requested_size: initial_size,
            last_position: initial_position.unwrap_or(Position::new(0, 0)),
            opacity: 1.0,
            pending_center: false,
        }
    }

    /// Opacity multiplier the views paint with
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Retry work that needed viewport info not available yet
    pub fn tick(&mut self) {
        if self.pending_center {
            self.center();
        }
    }

    fn send(&self, command: egui::ViewportCommand) {
        self.ctx.send_viewport_cmd(command);
    }
}

impl WindowController for EguiWindow {
    fn is_alive(&self) -> bool {
        !self.ctx.input(|i| i.viewport().close_requested())
    }

    fn is_minimized(&self) -> bool {
        self.ctx.input(|i| i.viewport().minimized.unwrap_or(false))
    }

    fn size(&self) -> Size {
        self.ctx
            .input(|i| i.viewport().inner_rect)
            .map(|rect| Size::new(rect.width().round() as u32, rect.height().round() as u32))
            .unwrap_or(self.requested_size)
    }

    fn position(&self) -> Position {
        self.ctx
            .input(|i| i.viewport().outer_rect)
            .map(|rect| Position::new(rect.min.x.round() as i32, rect.min.y.round() as i32))
            .unwrap_or(self.last_position)
    }

    fn set_size(&mut self, size: Size) {
        self.requested_size = size;
        self.send(egui::ViewportCommand::InnerSize(to_vec2(size)));
    }

    fn set_min_size(&mut self, size: Size) {
        self.send(egui::ViewportCommand::MinInnerSize(to_vec2(size)));
    }

    fn set_max_size(&mut self, size: Option<Size>) {
        // winit has no "unset" through egui; the validation cap is large enough
        let size = size.unwrap_or(Size::new(MAX_DIMENSION, MAX_DIMENSION));
        self.send(egui::ViewportCommand::MaxInnerSize(to_vec2(size)));
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        let level = if on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        };
        self.send(egui::ViewportCommand::WindowLevel(level));
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.send(egui::ViewportCommand::Resizable(resizable));
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.ctx.request_repaint();
    }

    fn center(&mut self) {
        let (monitor, outer) = self
            .ctx
            .input(|i| (i.viewport().monitor_size, i.viewport().outer_rect));
        let Some(monitor) = monitor.filter(|m| m.x > 0.0 && m.y > 0.0) else {
            debug!("Monitor size unknown yet, deferring center");
            self.pending_center = true;
            self.ctx.request_repaint();
            return;
        };

        // Use the size we asked for: a pending resize has not landed yet
        let size = to_vec2(self.requested_size);
        let decorations = outer
            .zip(self.ctx.input(|i| i.viewport().inner_rect))
            .map(|(outer, inner)| outer.size() - inner.size())
            .unwrap_or(egui::Vec2::ZERO);
        let origin = ((monitor - size - decorations) / 2.0).max(egui::Vec2::ZERO);

        self.pending_center = false;
        self.last_position = Position::new(origin.x.round() as i32, origin.y.round() as i32);
        self.send(egui::ViewportCommand::OuterPosition(origin.to_pos2()));
    }

    fn show(&mut self) {
        self.send(egui::ViewportCommand::Visible(true));
        self.send(egui::ViewportCommand::Focus);
    }
}
