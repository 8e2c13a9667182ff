use crate::build::walk;
use crate::error::{Error, IoContext, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a merged artifact physically lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// The artifact root the file was discovered under.
    pub root: PathBuf,
    pub file: PathBuf,
}

/// Maps each logical artifact path (relative to its root) to the one file
/// that provides it.
#[derive(Debug, Default)]
pub struct ArtifactIndex {
    entries: BTreeMap<PathBuf, Origin>,
}

impl ArtifactIndex {
    /// Index every file ending in `suffix` under each root, in root order.
    ///
    /// Fails on the first relative path two roots both provide; nothing is
    /// written anywhere before the whole index is known to be consistent.
    pub fn collect(roots: &[PathBuf], suffix: &str) -> Result<Self> {
        let mut index = Self::default();
        for root in roots {
            for file in walk::find_all(root, suffix)? {
                let relative = file
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| file.clone());
                index.insert(
                    relative,
                    Origin {
                        root: root.clone(),
                        file,
                    },
                )?;
            }
        }
        Ok(index)
    }

    pub fn insert(&mut self, relative: PathBuf, origin: Origin) -> Result<()> {
        match self.entries.entry(relative) {
            Entry::Vacant(slot) => {
                slot.insert(origin);
                Ok(())
            }
            Entry::Occupied(slot) => Err(Error::ArtifactCollision {
                relative: slot.key().clone(),
                first: slot.get().file.clone(),
                second: origin.file,
            }),
        }
    }

    pub fn get(&self, relative: &Path) -> Option<&Origin> {
        self.entries.get(relative)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Origin)> {
        self.entries.iter()
    }
}

/// Rebuild `staging` so it holds exactly the indexed files.
pub fn materialize(index: &ArtifactIndex, staging: &Path) -> Result<usize> {
    if staging.exists() {
        fs::remove_dir_all(staging).at(staging)?;
    }
    fs::create_dir_all(staging).at(staging)?;

    for (relative, origin) in index.iter() {
        let dest = staging.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        fs::copy(&origin.file, &dest).at(&origin.file)?;
    }
    Ok(index.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_disjoint_roots_union() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dep = dir.path().join("dep.jar.d");
        touch(&src.join("me/A.class"), "a");
        touch(&src.join("me/A.java"), "source");
        touch(&dep.join("com/lib/B.class"), "b");

        let index = ArtifactIndex::collect(&[src.clone(), dep.clone()], ".class").unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get(Path::new("me/A.class")).unwrap().file,
            src.join("me/A.class")
        );
        assert_eq!(index.get(Path::new("com/lib/B.class")).unwrap().root, dep);

        let staging = dir.path().join("build/jar");
        assert_eq!(materialize(&index, &staging).unwrap(), 2);
        assert_eq!(fs::read_to_string(staging.join("me/A.class")).unwrap(), "a");
        assert_eq!(
            fs::read_to_string(staging.join("com/lib/B.class")).unwrap(),
            "b"
        );
        assert!(!staging.join("me/A.java").exists());
    }

    #[test]
    fn test_collision_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("one");
        let second = dir.path().join("two");
        touch(&first.join("me/A.class"), "1");
        touch(&second.join("me/A.class"), "2");

        let err = ArtifactIndex::collect(&[first.clone(), second.clone()], ".class").unwrap_err();
        match err {
            Error::ArtifactCollision {
                relative,
                first: f,
                second: s,
            } => {
                assert_eq!(relative, PathBuf::from("me/A.class"));
                assert_eq!(f, first.join("me/A.class"));
                assert_eq!(s, second.join("me/A.class"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rematerialize_drops_removed_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        touch(&src.join("A.class"), "a");
        touch(&src.join("B.class"), "b");
        let staging = dir.path().join("staging");

        let index = ArtifactIndex::collect(&[src.clone()], ".class").unwrap();
        materialize(&index, &staging).unwrap();
        fs::remove_file(src.join("B.class")).unwrap();

        let index = ArtifactIndex::collect(&[src], ".class").unwrap();
        materialize(&index, &staging).unwrap();
        assert!(staging.join("A.class").exists());
        assert!(!staging.join("B.class").exists());
    }
}
