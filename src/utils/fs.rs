//! File system utilities.

use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Immediate children of a directory, sorted by file name.
///
/// Hidden entries (leading `.`) are skipped.
pub fn list_children(path: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            crate::Error::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            )
        })?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        children.push(entry.into_path());
    }
    Ok(children)
}

/// Move a file or directory, refusing to overwrite the destination.
pub fn move_no_overwrite(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
    }

    // Try rename first (fast, same filesystem)
    match std::fs::rename(from, to) {
        Ok(()) => return Ok(()),
        // Directories only ever move by rename.
        Err(e) if from.is_dir() => return Err(e.into()),
        Err(e) => tracing::debug!("Rename failed ({}), using copy+delete", e),
    }

    // Fall back to copy + delete (cross filesystem)
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)?;
    Ok(())
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if a file carries one of the given extensions (case-insensitive).
pub fn has_media_extension(path: &Path, extensions: &[String]) -> bool {
    get_extension(path)
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn media() -> Vec<String> {
        vec!["mkv".to_string(), "mp4".to_string(), "avi".to_string()]
    }

    #[test]
    fn test_has_media_extension() {
        assert!(has_media_extension(&PathBuf::from("movie.mkv"), &media()));
        assert!(has_media_extension(&PathBuf::from("movie.MP4"), &media()));
        assert!(!has_media_extension(&PathBuf::from("movie.txt"), &media()));
        assert!(!has_media_extension(&PathBuf::from("movie"), &media()));
    }

    #[test]
    fn test_list_children_sorted_and_visible_only() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("b")).unwrap();
        std::fs::create_dir(temp_dir.path().join("a")).unwrap();
        std::fs::write(temp_dir.path().join(".hidden"), "x").unwrap();

        let children = list_children(temp_dir.path()).unwrap();
        let names: Vec<_> = children
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_move_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("from.mkv");
        let to = temp_dir.path().join("to.mkv");
        std::fs::write(&from, "a").unwrap();
        std::fs::write(&to, "b").unwrap();

        let result = move_no_overwrite(&from, &to);
        assert!(matches!(result, Err(crate::Error::FileAlreadyExists(_))));
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "b");
        assert!(from.exists());
    }
}
