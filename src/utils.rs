use std::fs;
use std::path::{Path, PathBuf};

/// Path of the label file paired with `image_path`: same stem, `.txt`,
/// under `labels_dir`.
pub fn label_path_for(image_path: &Path, labels_dir: &Path) -> PathBuf {
    let stem = image_path.file_stem().unwrap_or_default();
    labels_dir.join(stem).with_extension("txt")
}

/// Move `src` to `dst`, falling back to copy + remove when a plain rename
/// fails (destination on another filesystem). A missing source is only a
/// warning so the other half of a decision can still go through.
pub fn safe_move(src: &Path, dst: &Path) {
    if !src.exists() {
        log::warn!("cannot find {}, skipping move", src.display());
        return;
    }
    if fs::rename(src, dst).is_ok() {
        return;
    }
    match fs::copy(src, dst).and_then(|_| fs::remove_file(src)) {
        Ok(()) => {}
        Err(e) => log::error!("failed to move {} to {}: {e}", src.display(), dst.display()),
    }
}

/// Delete `path`; a missing file is only a warning.
pub fn safe_remove(path: &Path) {
    if !path.exists() {
        log::warn!("cannot find {}, skipping delete", path.display());
        return;
    }
    if let Err(e) = fs::remove_file(path) {
        log::error!("failed to delete {}: {e}", path.display());
    }
}
