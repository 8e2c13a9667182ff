use crate::build::BuildOptions;
use crate::config::BundleConfig;
use crate::error::{IoContext, Result};
use crate::process;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the archiver inside `staging` and return the bundle it produced.
///
/// The command is `<archiver...> <entry_point> <name> <entry_roots...>`,
/// which for `jar cef` writes an executable jar with `entry_point` as its
/// main class.
pub fn publish(
    root: &Path,
    staging: &Path,
    bundle: &BundleConfig,
    opts: &BuildOptions,
) -> Result<PathBuf> {
    let mut cmd = process::command_from_argv(root, &bundle.archiver)?;
    cmd.arg(&bundle.entry_point)
        .arg(&bundle.name)
        .args(&bundle.entry_roots)
        .current_dir(staging);
    process::run_checked(&mut cmd, &bundle.name, opts.verbose)?;
    Ok(staging.join(&bundle.name))
}

/// Move a finished bundle into `dest_dir`, replacing any previous one.
pub fn relocate(bundle_file: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = bundle_file.file_name().unwrap_or_default();
    let dest = dest_dir.join(name);
    fs::rename(bundle_file, &dest).at(bundle_file)?;
    Ok(dest)
}

/// Copy the native binary into `dest_dir` and mark it executable.
pub fn install_binary(binary: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = binary.file_name().unwrap_or_default();
    let dest = dest_dir.join(name);
    fs::copy(binary, &dest).at(binary)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o755)).at(&dest)?;
    }

    Ok(dest)
}
