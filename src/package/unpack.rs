use crate::build::{BuildOptions, walk};
use crate::error::{IoContext, Result};
use crate::process;
use std::fs;
use std::path::{Path, PathBuf};

/// The directory an archive is unpacked into: `jars/dep.jar` -> `jars/dep.jar.d`.
pub fn memo_dir(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_owned();
    name.push(".d");
    PathBuf::from(name)
}

/// Every archive under `dir` ending in `ext`, skipping anything that lives
/// inside another archive's memo directory.
pub fn find_archives(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let memo_suffix = format!("{ext}.d");
    let mut archives = walk::find_all(dir, ext)?;
    archives.retain(|archive| {
        let relative = archive.strip_prefix(dir).unwrap_or(archive);
        !relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .any(|c| c.as_os_str().to_string_lossy().ends_with(&memo_suffix))
    });
    Ok(archives)
}

/// Unpack every archive whose memo directory does not exist yet, and return
/// all memo directories in archive order.
///
/// An existing memo directory is trusted as-is, even if the archive changed
/// since it was unpacked. `alb clean` is the way to force a fresh unpack.
pub fn unpack_archives(
    root: &Path,
    archives: &[PathBuf],
    extractor: &[String],
    opts: &BuildOptions,
) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::with_capacity(archives.len());

    for archive in archives {
        let archive = root.join(archive);
        let target = memo_dir(&archive);

        if !target.is_dir() {
            fs::create_dir_all(&target).at(&target)?;

            let mut cmd = process::command_from_argv(root, extractor)?;
            cmd.arg(&archive).current_dir(&target);
            let label = archive
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if let Err(e) = process::run_checked(&mut cmd, &label, opts.verbose) {
                // A half-extracted directory must not count as unpacked.
                let _ = fs::remove_dir_all(&target);
                return Err(e);
            }
        }
        dirs.push(target);
    }

    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_dir_appends_suffix() {
        assert_eq!(
            memo_dir(Path::new("jars/json.jar")),
            PathBuf::from("jars/json.jar.d")
        );
    }

    #[test]
    fn test_find_archives_ignores_unpacked_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dep.jar"), "").unwrap();
        fs::create_dir_all(dir.path().join("dep.jar.d/lib")).unwrap();
        fs::write(dir.path().join("dep.jar.d/lib/nested.jar"), "").unwrap();

        let archives = find_archives(dir.path(), ".jar").unwrap();
        assert_eq!(archives, vec![dir.path().join("dep.jar")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_memo_dir_skips_extractor() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("dep.jar");
        fs::write(&archive, "").unwrap();
        fs::create_dir(memo_dir(&archive)).unwrap();

        // `false` would fail the build if it were run.
        let extractor = vec!["false".to_string()];
        let dirs =
            unpack_archives(dir.path(), &[archive.clone()], &extractor, &BuildOptions::default())
                .unwrap();
        assert_eq!(dirs, vec![memo_dir(&archive)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_extract_is_not_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("dep.jar");
        fs::write(&archive, "").unwrap();

        let extractor = vec!["false".to_string()];
        let result =
            unpack_archives(dir.path(), &[archive.clone()], &extractor, &BuildOptions::default());
        assert!(result.is_err());
        assert!(!memo_dir(&archive).exists());
    }
}
