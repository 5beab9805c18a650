//! Front-end views: the settings form and the compact timer face
//!
//! Views never touch the window or the store. They render the settings they
//! were sent and queue `InboundSignal`s for the shell to handle.

use eframe::egui;

use crate::config::{AmPm, AppSettings, AppSettingsPatch, ProgressBarType};
use crate::constants::app;
use crate::ipc::{InboundSignal, OutboundSignal};

use super::constants::*;

/// Editable copy of the settings plus the outbox of pending signals
pub struct FrontEnd {
    settings: AppSettings,
    hour: u8,
    minute: u8,
    outbox: Vec<InboundSignal>,
}

impl Default for FrontEnd {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

fn parse_two_digit(value: &str, range: std::ops::RangeInclusive<u8>) -> u8 {
    value
        .parse::<u8>()
        .ok()
        .filter(|v| range.contains(v))
        .unwrap_or(*range.start())
}

impl FrontEnd {
    pub fn new(settings: AppSettings) -> Self {
        let hour = parse_two_digit(&settings.alarm_hour, 1..=12);
        let minute = parse_two_digit(&settings.alarm_minute, 0..=59);
        Self {
            settings,
            hour,
            minute,
            outbox: Vec::new(),
        }
    }

    pub fn receive(&mut self, signal: OutboundSignal) {
        match signal {
            OutboundSignal::LoadSettings(settings) => *self = Self {
                outbox: std::mem::take(&mut self.outbox),
                ..Self::new(settings)
            },
        }
    }

    /// Signals queued since the last call, oldest first
    pub fn drain(&mut self) -> Vec<InboundSignal> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply a field change locally and queue a save carrying only that field
    fn edit(&mut self, patch: AppSettingsPatch) {
        self.settings.merge(patch.clone());
        self.outbox.push(InboundSignal::PersistSettings(patch));
    }

    pub fn start_timer(&mut self) {
        self.outbox.push(InboundSignal::SwitchToTimer(None));
    }

    pub fn back_to_setup(&mut self) {
        self.outbox.push(InboundSignal::SwitchToSetup);
    }

    pub fn fire_alarm(&mut self) {
        self.outbox.push(InboundSignal::FireNotification {
            title: app::NAME.to_string(),
            body: format!("Alarm: {}", self.settings.alarm_label()),
        });
    }

    pub fn quit(&mut self) {
        self.outbox.push(InboundSignal::RequestQuit);
    }

    pub fn setup_ui(&mut self, ui: &mut egui::Ui) {
        ui.add_space(PADDING);
        ui.heading(app::NAME);
        ui.add_space(SECTION_SPACING);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Alarm").strong());
            ui.add_space(ITEM_SPACING);

            ui.horizontal(|ui| {
                ui.label("Time:");
                if ui
                    .add(egui::DragValue::new(&mut self.hour).range(1..=12).custom_formatter(|v, _| format!("{:02}", v as u8)))
                    .changed()
                {
                    self.edit(AppSettingsPatch {
                        alarm_hour: Some(format!("{:02}", self.hour)),
                        ..Default::default()
                    });
                }
                ui.label(":");
                if ui
                    .add(egui::DragValue::new(&mut self.minute).range(0..=59).custom_formatter(|v, _| format!("{:02}", v as u8)))
                    .changed()
                {
                    self.edit(AppSettingsPatch {
                        alarm_minute: Some(format!("{:02}", self.minute)),
                        ..Default::default()
                    });
                }

                let mut am_pm = self.settings.alarm_am_pm;
                let before = am_pm;
                ui.selectable_value(&mut am_pm, AmPm::Am, "AM");
                ui.selectable_value(&mut am_pm, AmPm::Pm, "PM");
                if am_pm != before {
                    self.edit(AppSettingsPatch {
                        alarm_am_pm: Some(am_pm),
                        ..Default::default()
                    });
                }
            });
        });

        ui.add_space(SECTION_SPACING);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Timer Window").strong());
            ui.add_space(ITEM_SPACING);

            ui.horizontal(|ui| {
                ui.label("Opacity:");
                let mut opacity = self.settings.opacity;
                if ui
                    .add(egui::Slider::new(&mut opacity, 10..=100).suffix("%"))
                    .changed()
                {
                    self.edit(AppSettingsPatch {
                        opacity: Some(opacity),
                        ..Default::default()
                    });
                }
            });

            ui.add_space(ITEM_SPACING);

            let mut show = self.settings.show_progress_bar;
            if ui.checkbox(&mut show, "Show progress bar").changed() {
                self.edit(AppSettingsPatch {
                    show_progress_bar: Some(show),
                    ..Default::default()
                });
            }

            ui.add_enabled_ui(self.settings.show_progress_bar, |ui| {
                ui.horizontal(|ui| {
                    let mut kind = self.settings.progress_bar_type;
                    let before = kind;
                    ui.radio_value(&mut kind, ProgressBarType::Segments, "Segments");
                    ui.radio_value(&mut kind, ProgressBarType::Percentage, "Percentage");
                    if kind != before {
                        self.edit(AppSettingsPatch {
                            progress_bar_type: Some(kind),
                            ..Default::default()
                        });
                    }
                });
            });
        });

        ui.add_space(SECTION_SPACING);
        ui.separator();
        ui.add_space(SECTION_SPACING);

        ui.horizontal(|ui| {
            if ui.button("\u{23F0} Start").clicked() {
                self.start_timer();
            }
            if ui.button("\u{1F514} Test alarm").clicked() {
                self.fire_alarm();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Quit").clicked() {
                    self.quit();
                }
            });
        });
    }

    pub fn timer_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(self.settings.alarm_label())
                    .size(TIMER_FONT_SIZE)
                    .color(ACCENT)
                    .strong(),
            );
            if self.settings.show_progress_bar {
                let style = match self.settings.progress_bar_type {
                    ProgressBarType::Segments => "segments",
                    ProgressBarType::Percentage => "percentage",
                };
                ui.weak(format!("progress: {style}"));
            }
            ui.add_space(ITEM_SPACING);
            if ui.small_button("Back").clicked() {
                self.back_to_setup();
            }
        });
    }

    /// Panel fill for the timer view, faded by the chosen opacity
    pub fn timer_background(&self) -> egui::Color32 {
        let alpha = (self.settings.opacity.min(100) as f32 / 100.0 * 255.0).round() as u8;
        egui::Color32::from_rgba_unmultiplied(
            TIMER_BACKGROUND.r(),
            TIMER_BACKGROUND.g(),
            TIMER_BACKGROUND.b(),
            alpha,
        )
    }
}
