use eframe::egui;

use crate::app::ReviewApp;

pub fn top_panel(app: &mut ReviewApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Choose image folder").clicked() {
                app.select_image_dir();
            }
            if ui.button("Choose label folder").clicked() {
                app.select_label_dir();
            }

            ui.label(format!("Images: {}", app.config.input_images_dir.display()));
            ui.label(format!("Labels: {}", app.config.input_labels_dir.display()));
        });

        if let Some(session) = &app.session {
            let stats = session.statistics();
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} / {} reviewed",
                    stats.reviewed(),
                    session.files().len()
                ));
                ui.separator();
                ui.label(format!(
                    "{} kept · {} kept without label · {} discarded · {} skipped",
                    stats.kept, stats.kept_without_label, stats.discarded, stats.skipped
                ));
            });
        }
    });
}
