//! Build artifact cleanup.
//!
//! This module provides the `alb clean` command for removing build state.
//!
//! ## Options
//!
//! - `alb clean` - Remove the staging tree and every `<archive>.d` unpack directory
//! - `alb clean --all` - Also remove the bundle, the installed binary, and compiled outputs

use super::stale::output_path;
use super::{BuildSpec, walk};
use crate::config::ProjectConfig;
use crate::error::{IoContext, Result};
use crate::package;
use colored::*;
use std::fs;
use std::path::Path;

pub fn clean(root: &Path, config: &ProjectConfig, all: bool) -> Result<usize> {
    let mut removed = 0;

    // 1. Staging tree
    let staging = root.join(&config.bundle.staging_dir);
    if staging.exists() {
        fs::remove_dir_all(&staging).at(&staging)?;
        removed += 1;
    }

    // 2. Unpack memo directories, so changed archives are extracted again
    let managed = &config.managed;
    for archive in package::find_archives(&root.join(&managed.archive_dir), &managed.archive_ext)? {
        let memo = package::memo_dir(&archive);
        if memo.is_dir() {
            fs::remove_dir_all(&memo).at(&memo)?;
            removed += 1;
        }
    }

    if all {
        // 3. Relocated outputs
        let binary = root.join(&config.native.binary);
        let mut outputs = vec![root.join(&config.bundle.name)];
        if let Some(name) = binary.file_name() {
            outputs.push(root.join(name));
        }

        // 4. Compiled units
        outputs.extend(walk::find_all(&root.join(&managed.source_dir), &managed.output_ext)?);
        let native = BuildSpec::new(&config.native.source_ext, "");
        for source in walk::find_all(&root.join(&config.native.source_dir), &native.source_ext)? {
            outputs.push(output_path(&source, &native)?);
        }

        for path in outputs {
            if path.is_file() {
                fs::remove_file(&path).at(&path)?;
                removed += 1;
            }
        }
    }

    if removed > 0 {
        println!("{} Clean complete ({} removed).", "✓".green(), removed);
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_memo_and_staging() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = ProjectConfig::default();
        fs::create_dir_all(root.join("jars/dep.jar.d/com")).unwrap();
        fs::write(root.join("jars/dep.jar"), "").unwrap();
        fs::create_dir_all(root.join("build/jar/me")).unwrap();
        fs::create_dir_all(root.join("src/java/me")).unwrap();
        fs::write(root.join("src/java/me/A.class"), "").unwrap();

        assert_eq!(clean(root, &config, false).unwrap(), 2);
        assert!(!root.join("jars/dep.jar.d").exists());
        assert!(!root.join("build/jar").exists());
        assert!(root.join("jars/dep.jar").exists());
        assert!(root.join("src/java/me/A.class").exists());
    }

    #[test]
    fn test_clean_all_removes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = ProjectConfig::default();
        fs::create_dir_all(root.join("src/java/me")).unwrap();
        fs::write(root.join("src/java/me/A.java"), "").unwrap();
        fs::write(root.join("src/java/me/A.class"), "").unwrap();
        fs::create_dir_all(root.join("src/c")).unwrap();
        fs::write(root.join("src/c/alco.c"), "").unwrap();
        fs::write(root.join("src/c/alco"), "").unwrap();
        fs::write(root.join("alco"), "").unwrap();
        fs::write(root.join("alco.jar"), "").unwrap();

        assert_eq!(clean(root, &config, true).unwrap(), 4);
        assert!(root.join("src/java/me/A.java").exists());
        assert!(root.join("src/c/alco.c").exists());
        assert!(!root.join("alco.jar").exists());
        assert!(!root.join("src/c/alco").exists());
    }

    #[test]
    fn test_nothing_to_clean() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(clean(dir.path(), &ProjectConfig::default(), true).unwrap(), 0);
    }
}
