use std::path::PathBuf;

use clap::Parser;

/// Side length of the square display canvas, in pixels.
pub const CANVAS_SIZE: u32 = 640;

/// Where to read candidates from and where to file the survivors.
///
/// The defaults match the directory layout this tool has always been run
/// against, so invoking it with no arguments from the dataset root keeps
/// working.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "label_filter",
    about = "Review YOLO detection images one keystroke at a time: y = keep, n = discard, p = keep image but drop its label."
)]
pub struct ReviewConfig {
    /// Directory containing the images to review.
    #[arg(long, default_value = "unfiltered images")]
    pub input_images_dir: PathBuf,

    /// Directory containing the matching `<stem>.txt` label files.
    #[arg(long, default_value = "unfiltered labels")]
    pub input_labels_dir: PathBuf,

    /// Directory kept images are moved into (created if absent).
    #[arg(long, default_value = "filtered images")]
    pub output_images_dir: PathBuf,

    /// Directory kept labels are moved into (created if absent).
    #[arg(long, default_value = "filtered labels")]
    pub output_labels_dir: PathBuf,

    /// Image extensions to pick up, matched case-sensitively.
    #[arg(long = "ext", value_name = "EXT", default_values_t = default_extensions())]
    pub accepted_extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

impl ReviewConfig {
    /// Config rooted at `base`, with the default directory names and
    /// extensions. Used by tests and by the directory re-pick flow.
    pub fn rooted_at(base: &std::path::Path) -> Self {
        Self {
            input_images_dir: base.join("unfiltered images"),
            input_labels_dir: base.join("unfiltered labels"),
            output_images_dir: base.join("filtered images"),
            output_labels_dir: base.join("filtered labels"),
            accepted_extensions: default_extensions(),
        }
    }

    pub fn accepts(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.accepted_extensions.iter().any(|a| a == ext))
    }
}
