use std::path::PathBuf;

use eframe::egui;

use crate::config::{CANVAS_SIZE, ReviewConfig};
use crate::models::Command;
use crate::session::ReviewSession;
use crate::{compositor, ui};

pub struct ReviewApp {
    pub config: ReviewConfig,
    pub session: Option<ReviewSession>,
    texture: Option<egui::TextureHandle>,
    texture_path: Option<PathBuf>,
    pub status_message: Option<(String, f32)>,
}

impl ReviewApp {
    pub fn new(config: ReviewConfig) -> Self {
        let mut app = Self {
            config,
            session: None,
            texture: None,
            texture_path: None,
            status_message: None,
        };
        app.open_session();
        app
    }

    pub fn show_status(&mut self, message: &str) {
        self.status_message = Some((message.to_string(), 2.0));
    }

    /// (Re)start a review pass over the configured input directory.
    pub fn open_session(&mut self) {
        self.texture = None;
        self.texture_path = None;
        match ReviewSession::new(self.config.clone()) {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                log::error!("could not start review: {e:#}");
                self.session = None;
                self.show_status(&format!("could not start review: {e:#}"));
            }
        }
    }

    pub fn select_image_dir(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            self.config.input_images_dir = path;
            self.open_session();
        }
    }

    pub fn select_label_dir(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            self.config.input_labels_dir = path;
            self.open_session();
        }
    }

    /// Route one keystroke to the session and surface its summary.
    pub fn apply_command(&mut self, command: Command) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_finished() {
            return;
        }
        let message = session.apply(command);
        self.texture = None;
        self.texture_path = None;
        self.show_status(&message);
    }

    /// Texture for the current image's composed canvas, rebuilt only when
    /// the image on screen changes.
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let entry = self.session.as_ref()?.current()?;

        if self.texture_path.as_ref() != Some(&entry.path) {
            let canvas = compositor::compose(&entry.image, &entry.boxes, CANVAS_SIZE);
            let size = [canvas.width() as usize, canvas.height() as usize];
            let texture = ctx.load_texture(
                "review_canvas",
                egui::ColorImage::from_rgb(size, canvas.as_raw()),
                Default::default(),
            );
            self.texture_path = Some(entry.path.clone());
            self.texture = Some(texture);
        }

        self.texture.clone()
    }
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::top::top_panel(self, ctx);
        ui::side::side_panel(self, ctx);
        ui::central::central_panel(self, ctx);
    }
}
