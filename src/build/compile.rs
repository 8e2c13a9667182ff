use super::stale::{BuildSpec, is_stale, output_path};
use super::BuildOptions;
use crate::error::Result;
use crate::process;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Classpath entries are joined with this separator, as `javac` expects on Unix.
const CLASSPATH_SEPARATOR: &str = ":";

/// The two compiler families a project mixes.
#[derive(Debug, Clone)]
pub enum Toolchain {
    /// Produces `.class` files beside each source; they are bundled later.
    Managed {
        program: String,
        classpath: Vec<PathBuf>,
        spec: BuildSpec,
    },
    /// Produces an executable named after the source, next to it.
    Native { program: String, spec: BuildSpec },
}

impl Toolchain {
    pub fn spec(&self) -> &BuildSpec {
        match self {
            Toolchain::Managed { spec, .. } | Toolchain::Native { spec, .. } => spec,
        }
    }

    /// Assemble the compiler invocation for one source file.
    pub fn command(&self, source: &Path, opts: &BuildOptions) -> Result<Command> {
        match self {
            Toolchain::Managed {
                program, classpath, ..
            } => {
                let mut cmd = Command::new(program);
                if opts.debug {
                    cmd.arg("-g");
                }
                let joined = classpath
                    .iter()
                    .map(|p| p.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(CLASSPATH_SEPARATOR);
                cmd.arg("-classpath").arg(joined).arg(source);
                Ok(cmd)
            }
            Toolchain::Native { program, spec } => {
                let output = output_path(source, spec)?;
                let mut cmd = Command::new(program);
                cmd.arg("-o").arg(output).arg(source);
                Ok(cmd)
            }
        }
    }
}

/// Compile one source, echoing the command (verbose) or just the source.
///
/// The compiler runs inside `root`, and sources under it are passed
/// relative to it.
pub fn compile(
    toolchain: &Toolchain,
    root: &Path,
    source: &Path,
    opts: &BuildOptions,
) -> Result<()> {
    let relative = source.strip_prefix(root).unwrap_or(source);
    let mut cmd = toolchain.command(relative, opts)?;
    cmd.current_dir(root);
    process::run_checked(&mut cmd, &relative.to_string_lossy(), opts.verbose)
}

/// Compile `source` only if its output is missing or older. Returns whether
/// the compiler ran.
pub fn compile_if_stale(
    toolchain: &Toolchain,
    root: &Path,
    source: &Path,
    opts: &BuildOptions,
) -> Result<bool> {
    if !is_stale(source, toolchain.spec())? {
        return Ok(false);
    }
    compile(toolchain, root, source, opts)?;
    Ok(true)
}
