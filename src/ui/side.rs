use eframe::egui;

use crate::app::ReviewApp;

/// Read-only view of the snapshot file list. Entries cannot be clicked:
/// the pass always runs in order, one decision per image.
pub fn side_panel(app: &mut ReviewApp, ctx: &egui::Context) {
    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        let Some(session) = &app.session else {
            ui.label("No folder loaded");
            return;
        };

        let cursor = session.cursor();
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for (i, path) in session.files().iter().enumerate() {
                    let file_name = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();

                    let color = if i == cursor {
                        egui::Color32::YELLOW
                    } else if i < cursor {
                        egui::Color32::from_rgb(0, 100, 0)
                    } else {
                        egui::Color32::GRAY
                    };

                    let response = ui.label(egui::RichText::new(file_name).color(color));
                    if i == cursor {
                        response.scroll_to_me(Some(egui::Align::Center));
                    }
                }
            });
    });
}
