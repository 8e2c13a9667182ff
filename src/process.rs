//! Launching external tools.
//!
//! Every tool the build invokes goes through [`run_checked`]: echo, run to
//! completion, and turn a nonzero exit into [`Error::ToolFailed`].

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Render a command the way it would be typed in a shell (without quoting).
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a command from a configured argv (`["jar", "xf"]`).
pub fn command_from_argv(root: &Path, argv: &[String]) -> Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::InvalidConfig("empty command".to_string()))?;
    let mut cmd = Command::new(resolve_program(root, program));
    cmd.args(args);
    Ok(cmd)
}

/// Relative program paths with a separator (`./alco`) are taken relative to
/// the project root; bare names are left for `PATH` lookup.
pub fn resolve_program(root: &Path, program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        root.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Echo `cmd` (in full when verbose, otherwise just `label`), run it, and
/// block until it exits.
pub fn run_checked(cmd: &mut Command, label: &str, verbose: bool) -> Result<()> {
    if verbose {
        println!("{}", command_line(cmd));
    } else {
        println!("{label}");
    }

    let program = cmd.get_program().to_string_lossy().into_owned();
    let status = cmd.status().map_err(|source| Error::Launch {
        program: program.clone(),
        source,
    })?;

    if !status.success() {
        return Err(Error::ToolFailed { program, status });
    }
    Ok(())
}
