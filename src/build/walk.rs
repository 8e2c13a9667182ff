use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Run `action` on every file under `root` whose name ends with `suffix`,
/// returning how many calls reported that they did work.
///
/// Files are visited in name order. A missing root visits nothing. The first
/// error from `action` stops the walk.
pub fn recurse<F>(root: &Path, suffix: &str, mut action: F) -> Result<usize>
where
    F: FnMut(&Path) -> Result<bool>,
{
    let mut count = 0;
    for file in find_all(root, suffix)? {
        if action(&file)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Every file under `root` whose name ends with `suffix`, in name order.
pub fn find_all(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(suffix)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
