//! Discovers screenshots under `pics/` and normalizes their file
//! names to the canonical timestamp form.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{Result, SnapzError};
use crate::model::DocumentId;
use crate::timestamp::Timestamp;

pub const PICS_DIR: &str = "pics";

const RAW_PREFIX: &str = "Screenshot ";
const RAW_FORMAT: &str = "%Y-%m-%d %H%M%S";
const CANONICAL_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A screenshot file whose name encodes its capture time, either in
/// the raw form the OS writes (`Screenshot 2024-01-15 143527.png`) or
/// the canonical form this tool keeps (`2024-01-15_14-35-27.png`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub file_name: String,
    pub timestamp: Timestamp,
}

impl Picture {
    /// Files matching neither name shape yield `None` and are skipped
    /// during discovery.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".png")?;
        let datetime = match stem.strip_prefix(RAW_PREFIX) {
            Some(raw) => NaiveDateTime::parse_from_str(raw, RAW_FORMAT).ok()?,
            None => NaiveDateTime::parse_from_str(stem, CANONICAL_FORMAT).ok()?,
        };

        Some(Picture {
            file_name: file_name.to_string(),
            timestamp: Timestamp::new(datetime),
        })
    }

    pub fn id(&self) -> DocumentId {
        self.timestamp.id()
    }

    /// Workspace-relative path, always with forward slashes.
    pub fn file_path(&self) -> String {
        format!("{PICS_DIR}/{}", self.file_name)
    }

    fn canonical_file_name(&self) -> String {
        format!("{}.png", self.timestamp.formatted())
    }

    fn is_canonical(&self) -> bool {
        self.file_name == self.canonical_file_name()
    }
}

/// Discovers pictures in `pics/` under the current directory.
pub fn discover() -> Result<Vec<Picture>> {
    discover_in(Path::new("."))
}

/// Reads the pictures directory, renaming raw screenshots to their
/// canonical names first. The result is sorted by file name, so the
/// last element is the most recent capture.
pub fn discover_in(base: &Path) -> Result<Vec<Picture>> {
    let dir = base.join(PICS_DIR);
    if !dir.is_dir() {
        return Err(SnapzError::Store(format!(
            "missing \"{PICS_DIR}\" directory"
        )));
    }

    let mut pictures = read_pictures(&dir)?;
    if pictures.iter().any(|picture| !picture.is_canonical()) {
        for picture in pictures.iter().filter(|picture| !picture.is_canonical()) {
            fs::rename(
                dir.join(&picture.file_name),
                dir.join(picture.canonical_file_name()),
            )?;
        }
        pictures = read_pictures(&dir)?;
    }

    pictures.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(pictures)
}

fn read_pictures(dir: &Path) -> Result<Vec<Picture>> {
    let mut pictures = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(picture) = Picture::from_file_name(file_name) {
            pictures.push(picture);
        }
    }
    Ok(pictures)
}
