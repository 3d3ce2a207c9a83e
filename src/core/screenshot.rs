//! PNG export of the current canvas.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::canvas::Canvas;
use super::selection::screenshot_name;

/// Write `canvas` to `dir/<file name without .json>.png` and return the
/// path.  Any folder part of `file` is dropped.
pub fn export_png(canvas: &Canvas, dir: &Path, file: &str) -> Result<PathBuf> {
    if file.is_empty() {
        bail!("no file selected");
    }
    let Some(name) = screenshot_name(file) else {
        bail!("cannot name a screenshot for {file:?}");
    };
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(name);
    canvas
        .image()
        .save_with_format(&path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_named_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new(8, 6);
        let path = export_png(&canvas, dir.path(), "trace.json").unwrap();
        assert_eq!(path, dir.path().join("trace.png"));

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shots/today");
        let path = export_png(&Canvas::new(2, 2), &nested, "g.json").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn absolute_file_stays_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let file = elsewhere.path().join("owned.json");
        let path = export_png(&Canvas::new(2, 2), dir.path(), &file.to_string_lossy()).unwrap();
        assert_eq!(path, dir.path().join("owned.png"));
        assert!(path.exists());
        assert!(!elsewhere.path().join("owned.png").exists());
    }

    #[test]
    fn parent_components_do_not_escape() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("shots");
        let path = export_png(&Canvas::new(2, 2), &dir, "../escaped.json").unwrap();
        assert_eq!(path, dir.join("escaped.png"));
        assert!(!root.path().join("escaped.png").exists());
    }

    #[test]
    fn nested_file_is_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_png(&Canvas::new(2, 2), dir.path(), "sub/g.json").unwrap();
        assert_eq!(path, dir.path().join("g.png"));
        assert!(path.exists());
    }

    #[test]
    fn refuses_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_png(&Canvas::new(2, 2), dir.path(), "").is_err());
        assert!(export_png(&Canvas::new(2, 2), dir.path(), "data/").is_err());
    }
}
