use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use super::{CmdMessage, CmdResult};
use crate::config::CONFIG_FILENAME;
use crate::error::Result;
use crate::pictures::PICS_DIR;
use crate::store::fs::METADATA_FILENAME;
use crate::timestamp::Timestamp;

pub const BACKUP_DIR: &str = "backup";

/// Archives the pictures and both state files into
/// `backup/<timestamp>.tar.gz` under the workspace root.
pub fn run(root: &Path) -> Result<CmdResult> {
    let dest_dir = root.join(BACKUP_DIR);
    std::fs::create_dir_all(&dest_dir)?;

    let file_name = format!("{}.tar.gz", Timestamp::now().formatted());
    let file = File::create(dest_dir.join(&file_name))?;
    write_archive(file, root)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Backed up to: {BACKUP_DIR}/{file_name}"
    )));
    Ok(result)
}

fn write_archive<W: Write>(writer: W, root: &Path) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    tar.append_dir_all(PICS_DIR, root.join(PICS_DIR))?;
    for name in [METADATA_FILENAME, CONFIG_FILENAME] {
        let path = root.join(name);
        if path.exists() {
            tar.append_path_with_name(&path, name)?;
        }
    }

    tar.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(PICS_DIR)).unwrap();
        fs::write(
            dir.path().join(PICS_DIR).join("2024-01-15_14-35-27.png"),
            b"png",
        )
        .unwrap();
        fs::write(dir.path().join(METADATA_FILENAME), "{}").unwrap();
        dir
    }

    #[test]
    fn test_write_archive_produces_gzip() {
        let dir = workspace();
        let mut buf = Vec::new();
        write_archive(&mut buf, dir.path()).unwrap();

        assert!(!buf.is_empty());
        // Gzip header magic.
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }

    #[test]
    fn test_run_creates_backup_file() {
        let dir = workspace();
        let result = run(dir.path()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path().join(BACKUP_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with(".tar.gz"));
        assert!(result.messages[0].content.contains("Backed up to"));
    }

    #[test]
    fn test_missing_config_is_skipped() {
        let dir = workspace();
        let mut buf = Vec::new();
        // No .snapz-config on disk; the archive still writes.
        write_archive(&mut buf, dir.path()).unwrap();
        assert!(!buf.is_empty());
    }
}
