use eframe::egui;

use crate::app::ReviewApp;
use crate::config::CANVAS_SIZE;
use crate::models::Command;

pub fn central_panel(app: &mut ReviewApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if app.session.is_none() {
            ui.heading("Pick an image folder to start reviewing");
            show_status_line(app, ui);
            return;
        }

        if app.session.as_ref().is_some_and(|s| s.is_finished()) {
            ui.heading("Review complete");
            if ui.button("Close").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            show_status_line(app, ui);
            return;
        }

        if let Some(key) = pressed_key(ui) {
            app.apply_command(command_for_key(key));
        }

        if let Some(name) = app
            .session
            .as_ref()
            .and_then(|s| s.current())
            .map(|entry| entry.file_name())
        {
            ui.label(format!(
                "{name}  —  y: keep · n: discard · p: keep image, drop label · other: skip"
            ));
        }

        show_status_line(app, ui);

        if let Some(texture) = app.canvas_texture(ctx) {
            let size = egui::vec2(CANVAS_SIZE as f32, CANVAS_SIZE as f32);
            ui.with_layout(
                egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                |ui| ui.image((texture.id(), size)),
            );
        }
    });
}

fn show_status_line(app: &ReviewApp, ui: &mut egui::Ui) {
    if let Some((message, _)) = &app.status_message {
        ui.label(message);
    }
}

/// First fresh key press this frame, if any.
fn pressed_key(ui: &egui::Ui) -> Option<egui::Key> {
    ui.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => Some(*key),
            _ => None,
        })
    })
}

fn command_for_key(key: egui::Key) -> Command {
    match key {
        egui::Key::Y => Command::Keep,
        egui::Key::N => Command::Discard,
        egui::Key::P => Command::KeepImageOnly,
        _ => Command::Skip,
    }
}
