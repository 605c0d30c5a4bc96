use crate::app::action::Action;
use crate::app::app::UiCtx;
use crate::app::ui::error::ErrorInfo;

/// Why the last start attempt failed, with a retry
pub struct ErrorView {
    info: ErrorInfo,
}

impl ErrorView {
    pub fn new(info: ErrorInfo) -> Self {
        Self { info }
    }

    pub fn ui(&mut self, egui_ctx: &egui::Context, ui_ctx: &mut UiCtx<'_>) {
        egui::CentralPanel::default().show(egui_ctx, |_ui| {
            egui::Window::new(self.info.context.clone())
                .id(egui::Id::new("session_error"))
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .collapsible(false)
                .resizable(false)
                .min_width(380.0)
                .show(egui_ctx, |ui| {
                    if let Some(command) = self.info.failed_command {
                        ui.horizontal(|ui| {
                            ui.label("Stopped at");
                            ui.monospace(command);
                        });
                    }
                    if let Some(hint) = &self.info.hint {
                        ui.label(egui::RichText::new(hint).strong());
                    }

                    ui.add_space(8.0);
                    egui::CollapsingHeader::new("Details")
                        .default_open(self.info.hint.is_none())
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(&self.info.details).monospace());
                            if ui.small_button("Copy").clicked() {
                                egui_ctx.copy_text(self.info.details.clone());
                            }
                        });

                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        if ui.button("Choose another ROM…").clicked() {
                            ui_ctx.actions.push(Action::Start);
                        }
                        if ui.button("Back").clicked() {
                            ui_ctx.actions.push(Action::AcknowledgeError);
                        }
                    });
                });
        });
    }
}
