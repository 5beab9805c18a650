//! eframe host: creates the window, feeds the shell and draws the views

mod constants;
mod host;
mod icon;
mod views;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{error, info};

use crate::config::SettingsStore;
use crate::constants::app;
use crate::coordinator::WindowProfile;
use crate::lifecycle::{Flow, Shell, StartupState};
use crate::notify::DesktopNotifier;
use crate::types::{Position, Size, ViewMode};
use crate::window::WindowController;

use constants::*;
use host::EguiWindow;
use views::FrontEnd;

struct KronosApp {
    shell: Shell<EguiWindow, DesktopNotifier>,
    front_end: FrontEnd,
    last_size: Option<Size>,
    last_position: Option<Position>,
    closed: bool,
}

impl KronosApp {
    fn new(cc: &CreationContext<'_>, store: Box<dyn SettingsStore>, startup: StartupState) -> Self {
        info!("Initializing egui host");
        let window = EguiWindow::new(cc.egui_ctx.clone(), startup.setup_size, startup.setup_position);
        Self {
            shell: Shell::new(window, store, DesktopNotifier::new(), startup),
            front_end: FrontEnd::default(),
            last_size: None,
            last_position: None,
            closed: false,
        }
    }

    /// Turn changes in the live viewport geometry into resize/move events.
    /// The first observation only records the baseline.
    fn track_geometry(&mut self) {
        let Some(window) = self.shell.coordinator().window() else {
            return;
        };
        let size = window.size();
        let position = window.position();

        let resized = self.last_size.is_some_and(|last| last != size);
        let moved = self.last_position.is_some_and(|last| last != position);
        self.last_size = Some(size);
        self.last_position = Some(position);

        if resized {
            self.shell.on_resize();
        }
        if moved {
            self.shell.on_move();
        }
    }

    fn dispatch_signals(&mut self, ctx: &egui::Context) {
        for signal in self.front_end.drain() {
            if self.shell.handle(signal) == Flow::Quit {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    /// Top strip that moves the frameless window
    fn drag_strip(ui: &mut egui::Ui) {
        let rect = egui::Rect::from_min_size(
            ui.max_rect().min,
            egui::vec2(ui.max_rect().width(), DRAG_STRIP_HEIGHT),
        );
        let response = ui.interact(rect, egui::Id::new("drag_strip"), egui::Sense::click_and_drag());
        if response.drag_started_by(egui::PointerButton::Primary) {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }
    }

    /// Bottom-right grip that resizes the frameless window
    fn resize_grip(ui: &mut egui::Ui) {
        let max = ui.max_rect().max;
        let rect = egui::Rect::from_min_max(
            max - egui::vec2(RESIZE_GRIP_SIZE, RESIZE_GRIP_SIZE),
            max,
        );
        let response = ui
            .interact(rect, egui::Id::new("resize_grip"), egui::Sense::drag())
            .on_hover_cursor(egui::CursorIcon::ResizeSouthEast);
        if response.drag_started_by(egui::PointerButton::Primary) {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::BeginResize(
                egui::viewport::ResizeDirection::SouthEast,
            ));
        }
        ui.painter().line_segment(
            [rect.left_bottom(), rect.right_top()],
            egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
        );
    }
}

impl eframe::App for KronosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.closed {
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.shell.on_window_closed();
            self.closed = true;
            return;
        }

        if let Some(signal) = self.shell.on_ready() {
            self.front_end.receive(signal);
        }
        if let Some(window) = self.shell.coordinator_mut().window_mut() {
            window.tick();
        }
        self.track_geometry();

        let opacity = self
            .shell
            .coordinator()
            .window()
            .map(EguiWindow::opacity)
            .unwrap_or(1.0);
        let mode = self.shell.mode();
        let fill = match mode {
            ViewMode::Setup => SETUP_BACKGROUND,
            ViewMode::Timer => self.front_end.timer_background(),
        };
        let frame = egui::Frame::new()
            .fill(fill)
            .corner_radius(CORNER_RADIUS)
            .inner_margin(egui::Margin::same(PADDING as i8));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.multiply_opacity(opacity);
            Self::drag_strip(ui);
            match mode {
                ViewMode::Setup => self.front_end.setup_ui(ui),
                ViewMode::Timer => self.front_end.timer_ui(ui),
            }
            Self::resize_grip(ui);
        });

        self.dispatch_signals(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Transparent window: only the panel frame is painted
        [0.0, 0.0, 0.0, 0.0]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Kronos exiting");
    }
}

fn viewport(startup: &StartupState) -> egui::ViewportBuilder {
    let profile = &WindowProfile::SETUP;
    let to_vec2 = |size: Size| [size.width as f32, size.height as f32];

    let mut builder = egui::ViewportBuilder::default()
        .with_title(app::NAME)
        .with_app_id(app::CONFIG_DIR)
        .with_inner_size(to_vec2(startup.setup_size))
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(true);
    if let Some(max) = profile.max_size {
        builder = builder.with_max_inner_size(to_vec2(max));
    }
    builder = builder.with_min_inner_size(to_vec2(profile.min_size));
    if let Some(position) = startup.setup_position {
        builder = builder.with_position([position.x as f32, position.y as f32]);
    }
    match icon::load_window_icon() {
        Ok(icon) => builder = builder.with_icon(icon),
        Err(err) => error!(error = ?err, "Failed to load window icon"),
    }
    builder
}

/// Run the window until the user quits or closes it
pub fn run_gui(store: Box<dyn SettingsStore>) -> Result<()> {
    let startup = StartupState::load(&*store);
    let options = NativeOptions {
        viewport: viewport(&startup),
        ..Default::default()
    };

    eframe::run_native(
        app::NAME,
        options,
        Box::new(move |cc| Ok(Box::new(KronosApp::new(cc, store, startup)))),
    )
    .map_err(|err| anyhow!("Failed to launch egui window: {err}"))
}
