use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::config::ReviewConfig;
use crate::models::{BoundingBox, Command, Statistics};
use crate::utils::{label_path_for, safe_move, safe_remove};

/// The image currently awaiting a decision.
pub struct Entry {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub boxes: Vec<BoundingBox>,
}

impl Entry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// One review pass over the input directory.
///
/// The file list is a snapshot taken at construction: images dropped into
/// the directory mid-run are left for the next run, and images that vanish
/// underneath us (manual cleanup in another window) are skipped silently.
/// Each decision is committed to the filesystem before the next image is
/// loaded, so interrupting the process never leaves a half-reviewed file.
pub struct ReviewSession {
    config: ReviewConfig,
    files: Vec<PathBuf>,
    cursor: usize,
    current: Option<Entry>,
    statistics: Statistics,
}

impl ReviewSession {
    pub fn new(config: ReviewConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_images_dir).with_context(|| {
            format!("failed to create {}", config.output_images_dir.display())
        })?;
        fs::create_dir_all(&config.output_labels_dir).with_context(|| {
            format!("failed to create {}", config.output_labels_dir.display())
        })?;

        let files = list_images(&config)?;
        log::info!(
            "{} image(s) to review in {}",
            files.len(),
            config.input_images_dir.display()
        );

        let mut session = Self {
            config,
            files,
            cursor: 0,
            current: None,
            statistics: Statistics::default(),
        };
        session.load_current();
        Ok(session)
    }

    pub fn current(&self) -> Option<&Entry> {
        self.current.as_ref()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Index of the image on screen within the snapshot list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Commit a decision for the current image and advance to the next
    /// survivor. Returns a one-line summary for the status bar.
    pub fn apply(&mut self, command: Command) -> String {
        let Some(entry) = self.current.take() else {
            return "nothing left to review".to_string();
        };

        let name = entry.file_name();
        let label = label_path_for(&entry.path, &self.config.input_labels_dir);
        let message = match command {
            Command::Discard => {
                log::info!("discard: {name}");
                safe_remove(&entry.path);
                safe_remove(&label);
                format!("discarded {name}")
            }
            Command::Keep => {
                log::info!("keep with label: {name}");
                safe_move(&entry.path, &self.config.output_images_dir.join(&name));
                if let Some(label_name) = label.file_name() {
                    safe_move(&label, &self.config.output_labels_dir.join(label_name));
                }
                format!("kept {name} with label")
            }
            Command::KeepImageOnly => {
                log::info!("keep without label: {name}");
                safe_move(&entry.path, &self.config.output_images_dir.join(&name));
                safe_remove(&label);
                format!("kept {name}, dropped label")
            }
            Command::Skip => {
                log::info!("invalid input, skipping {name}");
                format!("invalid input, skipped {name}")
            }
        };

        self.statistics.record(command);
        self.cursor += 1;
        self.load_current();
        message
    }

    /// Load the next reviewable image at or after the cursor, skipping
    /// entries that vanished or fail to decode.
    fn load_current(&mut self) {
        while self.cursor < self.files.len() {
            let path = self.files[self.cursor].clone();

            // The snapshot may be stale; tolerate manual deletion.
            if !path.exists() {
                self.cursor += 1;
                continue;
            }

            match image::open(&path) {
                Ok(image) => {
                    let label = label_path_for(&path, &self.config.input_labels_dir);
                    let boxes = read_annotations(&label);
                    log::info!("displaying {}", path.display());
                    self.current = Some(Entry { path, image, boxes });
                    return;
                }
                Err(e) => {
                    log::warn!("unable to read image {}: {e}", path.display());
                    self.cursor += 1;
                }
            }
        }
        self.current = None;
    }
}

fn list_images(config: &ReviewConfig) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(&config.input_images_dir)
        .with_context(|| format!("failed to list {}", config.input_images_dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| config.accepts(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Read every well-formed box from a label file. A missing file means an
/// unlabeled image, not an error; malformed lines are skipped.
fn read_annotations(label_path: &Path) -> Vec<BoundingBox> {
    let Ok(file) = File::open(label_path) else {
        return Vec::new();
    };
    BufReader::new(file)
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| BoundingBox::parse_line(&line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::{TempDir, tempdir};

    fn setup(images: &[(&str, Option<&str>)]) -> (TempDir, ReviewConfig) {
        let dir = tempdir().unwrap();
        let config = ReviewConfig::rooted_at(dir.path());
        fs::create_dir_all(&config.input_images_dir).unwrap();
        fs::create_dir_all(&config.input_labels_dir).unwrap();

        for (name, label) in images {
            let img = RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]));
            img.save(config.input_images_dir.join(name)).unwrap();
            if let Some(contents) = label {
                let stem = Path::new(name).file_stem().unwrap();
                let label_path = config.input_labels_dir.join(stem).with_extension("txt");
                fs::write(label_path, contents).unwrap();
            }
        }
        (dir, config)
    }

    #[test]
    fn snapshot_lists_only_accepted_extensions_sorted() {
        let (_dir, config) = setup(&[("b.jpg", None), ("a.png", None)]);
        fs::write(config.input_images_dir.join("notes.txt"), "x").unwrap();
        fs::write(config.input_images_dir.join("c.JPG"), "x").unwrap();

        let session = ReviewSession::new(config).unwrap();
        let names: Vec<String> = session
            .files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.png", "b.jpg"]);
    }

    #[test]
    fn new_creates_output_directories() {
        let (_dir, config) = setup(&[]);
        let session = ReviewSession::new(config.clone()).unwrap();
        assert!(config.output_images_dir.is_dir());
        assert!(config.output_labels_dir.is_dir());
        assert!(session.is_finished());
    }

    #[test]
    fn current_entry_carries_parsed_boxes() {
        let (_dir, config) = setup(&[(
            "a.jpg",
            Some("0 0.5 0.5 0.2 0.2\nbad line\n1 0.25 0.25 0.1 0.1 extra\n"),
        )]);
        let session = ReviewSession::new(config).unwrap();
        let entry = session.current().unwrap();
        assert_eq!(entry.file_name(), "a.jpg");
        assert_eq!(entry.boxes.len(), 2);
        assert_eq!(entry.boxes[1].class, 1);
    }

    #[test]
    fn discard_deletes_both_files() {
        let (_dir, config) = setup(&[("a.jpg", Some("0 0.5 0.5 0.2 0.2\n"))]);
        let image = config.input_images_dir.join("a.jpg");
        let label = config.input_labels_dir.join("a.txt");

        let mut session = ReviewSession::new(config).unwrap();
        session.apply(Command::Discard);

        assert!(!image.exists());
        assert!(!label.exists());
        assert!(session.is_finished());
        assert_eq!(session.statistics().discarded, 1);
    }

    #[test]
    fn keep_moves_both_files_under_same_names() {
        let (_dir, config) = setup(&[("a.jpg", Some("0 0.5 0.5 0.2 0.2\n"))]);
        let src_image = config.input_images_dir.join("a.jpg");
        let src_label = config.input_labels_dir.join("a.txt");
        let dst_image = config.output_images_dir.join("a.jpg");
        let dst_label = config.output_labels_dir.join("a.txt");

        let mut session = ReviewSession::new(config).unwrap();
        session.apply(Command::Keep);

        assert!(!src_image.exists());
        assert!(!src_label.exists());
        assert!(dst_image.exists());
        assert_eq!(fs::read_to_string(dst_label).unwrap(), "0 0.5 0.5 0.2 0.2\n");
    }

    #[test]
    fn keep_image_only_moves_image_and_drops_label() {
        let (_dir, config) = setup(&[("a.jpg", Some("0 0.5 0.5 0.2 0.2\n"))]);
        let src_label = config.input_labels_dir.join("a.txt");
        let dst_image = config.output_images_dir.join("a.jpg");
        let dst_label = config.output_labels_dir.join("a.txt");

        let mut session = ReviewSession::new(config).unwrap();
        session.apply(Command::KeepImageOnly);

        assert!(dst_image.exists());
        assert!(!src_label.exists());
        assert!(!dst_label.exists());
    }

    #[test]
    fn skip_leaves_files_in_place_but_advances() {
        let (_dir, config) = setup(&[("a.jpg", Some("0 0.5 0.5 0.2 0.2\n")), ("b.jpg", None)]);
        let image = config.input_images_dir.join("a.jpg");
        let label = config.input_labels_dir.join("a.txt");

        let mut session = ReviewSession::new(config).unwrap();
        session.apply(Command::Skip);

        assert!(image.exists());
        assert!(label.exists());
        assert_eq!(session.current().unwrap().file_name(), "b.jpg");
    }

    #[test]
    fn keep_without_label_file_warns_but_moves_image() {
        let (_dir, config) = setup(&[("b.jpg", None)]);
        let dst_image = config.output_images_dir.join("b.jpg");

        let mut session = ReviewSession::new(config).unwrap();
        session.apply(Command::Keep);

        assert!(dst_image.exists());
        assert!(session.is_finished());
    }

    #[test]
    fn vanished_file_is_skipped_silently() {
        let (_dir, config) = setup(&[("a.jpg", None), ("b.jpg", None), ("c.jpg", None)]);
        let second = config.input_images_dir.join("b.jpg");

        let mut session = ReviewSession::new(config).unwrap();
        assert_eq!(session.files().len(), 3);

        // Pull the next file out from under the snapshot.
        fs::remove_file(&second).unwrap();
        session.apply(Command::Discard);

        assert_eq!(session.current().unwrap().file_name(), "c.jpg");
    }

    #[test]
    fn unreadable_image_is_skipped_with_no_fs_change() {
        let (_dir, config) = setup(&[("b.jpg", None)]);
        let bogus = config.input_images_dir.join("a.jpg");
        fs::write(&bogus, "not an image").unwrap();

        let session = ReviewSession::new(config).unwrap();
        assert_eq!(session.current().unwrap().file_name(), "b.jpg");
        assert!(bogus.exists());
    }

    #[test]
    fn run_resolves_every_image_exactly_once() {
        let (_dir, config) = setup(&[("a.jpg", None), ("b.jpg", None), ("c.jpg", None)]);
        let mut session = ReviewSession::new(config.clone()).unwrap();

        session.apply(Command::Keep);
        session.apply(Command::Discard);
        session.apply(Command::KeepImageOnly);

        assert!(session.is_finished());
        assert_eq!(session.statistics().reviewed(), 3);
        assert_eq!(fs::read_dir(&config.input_images_dir).unwrap().count(), 0);
        assert_eq!(fs::read_dir(&config.output_images_dir).unwrap().count(), 2);
    }
}
