use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, SnapzError};

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(editor) = env::var("VISUAL") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    // Try common fallbacks
    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(SnapzError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| SnapzError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(SnapzError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(SnapzError::Io)
}

/// Seeds `file_name` in the working directory with `initial`, opens it
/// in the editor, and returns the edited contents. The buffer file is
/// left in place afterwards.
pub fn edit_buffer(file_name: &str, initial: &str) -> Result<String> {
    fs::write(file_name, initial).map_err(SnapzError::Io)?;
    open_in_editor(file_name)
}
