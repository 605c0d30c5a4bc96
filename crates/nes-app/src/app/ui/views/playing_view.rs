use crate::app::app::UiCtx;
use crate::driver::stats::DriverReport;
use eframe::epaint::ColorImage;
use eframe::epaint::textures::TextureOptions;

/// Shows the canvas at its display size
pub struct PlayingView {
    rom_name: String,
    display_size: egui::Vec2,
}

impl PlayingView {
    pub fn new(rom_name: String) -> Self {
        PlayingView {
            rom_name,
            display_size: egui::Vec2::ZERO,
        }
    }

    pub fn ui(&mut self, egui_ctx: &egui::Context, ui_ctx: &mut UiCtx<'_>) {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            let seq = ui_ctx.frame.seq();
            if seq != *ui_ctx.shown_seq {
                let published = ui_ctx.frame.read();
                let color_image = ColorImage::from_rgba_unmultiplied(
                    [published.resolution.width, published.resolution.height],
                    &published.rgba,
                );
                self.display_size = egui::vec2(
                    published.display_size[0] as f32,
                    published.display_size[1] as f32,
                );
                drop(published);

                // Pixel-perfect scaling
                let tex = ui_ctx.texture.get_or_insert_with(|| {
                    ui.ctx()
                        .load_texture("nes_frame", color_image.clone(), TextureOptions::NEAREST)
                });
                tex.set(color_image, TextureOptions::NEAREST);
                *ui_ctx.shown_seq = seq;
            }

            match ui_ctx.texture.as_ref() {
                Some(tex) if seq > 0 => {
                    ui.vertical_centered(|ui| {
                        ui.image((tex.id(), self.display_size));
                        if let Some(report) = ui_ctx.frame.report() {
                            ui.add_space(4.0);
                            ui.label(
                                egui::RichText::new(status_line(&report))
                                    .monospace()
                                    .color(ui.visuals().weak_text_color()),
                            );
                        }
                    });
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label(format!("Booting {}…", self.rom_name));
                    });
                }
            }
        });
    }
}

fn status_line(report: &DriverReport) -> String {
    format!(
        "{:5.1} fps | skipped {} | faults {} | advance {:.1} ms | render {:.1} ms",
        report.fps,
        report.skipped,
        report.faulted,
        report.totals.last_advance.as_secs_f64() * 1000.0,
        report.totals.last_render.as_secs_f64() * 1000.0,
    )
}
