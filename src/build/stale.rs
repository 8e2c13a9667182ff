use crate::error::{Error, IoContext, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Source-to-output extension pairing for one toolchain.
///
/// An empty `output_ext` means the output is the source path with
/// `source_ext` stripped (`alco.c` -> `alco`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    pub source_ext: String,
    pub output_ext: String,
}

impl BuildSpec {
    pub fn new(source_ext: impl Into<String>, output_ext: impl Into<String>) -> Self {
        Self {
            source_ext: source_ext.into(),
            output_ext: output_ext.into(),
        }
    }
}

/// Where compiling `source` under `spec` leaves its output.
pub fn output_path(source: &Path, spec: &BuildSpec) -> Result<PathBuf> {
    let text = source.to_string_lossy();
    let stem = text
        .strip_suffix(spec.source_ext.as_str())
        .ok_or_else(|| Error::SuffixMismatch {
            file: source.to_path_buf(),
            suffix: spec.source_ext.clone(),
        })?;
    Ok(PathBuf::from(format!("{stem}{}", spec.output_ext)))
}

/// True when `source` has no output yet, or was modified strictly after it.
/// Equal timestamps count as up to date.
pub fn is_stale(source: &Path, spec: &BuildSpec) -> Result<bool> {
    let output = output_path(source, spec)?;
    if !output.exists() {
        return Ok(true);
    }

    let src_mtime = fs::metadata(source).and_then(|m| m.modified()).at(source)?;
    let out_mtime = fs::metadata(&output).and_then(|m| m.modified()).at(&output)?;
    Ok(src_mtime > out_mtime)
}
