//! File I/O helpers shared by the loader and the `run` command.
//!
//! Errors are flattened to `String` so callers can attach the path and wrap
//! them in whichever `CliError` variant fits.

use std::path::Path;

/// Read a text file, stripping a leading UTF-8 BOM if present.
///
/// # Example
///
/// ```rust,no_run
/// # use cardsim_cli::io_utils::read_text;
/// let text = read_text(std::path::Path::new("decks/standard.txt")).unwrap();
/// ```
pub fn read_text(path: &Path) -> Result<String, String> {
    let mut content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
