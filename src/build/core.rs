use super::BuildOptions;
use super::compile::{Toolchain, compile_if_stale};
use super::stale::BuildSpec;
use super::walk;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::package;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What one `alb build` did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub managed_units: usize,
    pub managed_compiled: usize,
    pub native_units: usize,
    pub native_compiled: usize,
    /// The bundle moved into the project root, if it was rebuilt.
    pub bundle: Option<PathBuf>,
    /// The native binary copied into the project root, if it was reinstalled.
    pub binary: Option<PathBuf>,
}

impl BuildReport {
    pub fn compiled(&self) -> usize {
        self.managed_compiled + self.native_compiled
    }
}

// --- CORE: Build Project ---
pub fn build_project(root: &Path, config: &ProjectConfig, opts: &BuildOptions) -> Result<BuildReport> {
    let start_time = Instant::now();
    let managed = &config.managed;
    let native = &config.native;

    // 1. Discover pre-built archives; they are both classpath and bundle input
    let archives = package::find_archives(&root.join(&managed.archive_dir), &managed.archive_ext)?;
    let mut classpath: Vec<PathBuf> = archives
        .iter()
        .map(|a| a.strip_prefix(root).unwrap_or(a).to_path_buf())
        .collect();
    classpath.push(managed.source_dir.clone());

    // 2. Managed sources
    let javac = Toolchain::Managed {
        program: managed.compiler.clone(),
        classpath,
        spec: BuildSpec::new(&managed.source_ext, &managed.output_ext),
    };
    let mut managed_units = 0;
    let managed_compiled = walk::recurse(
        &root.join(&managed.source_dir),
        &managed.source_ext,
        |source| {
            managed_units += 1;
            compile_if_stale(&javac, root, source, opts)
        },
    )?;

    // 3. Native sources
    let cc = Toolchain::Native {
        program: native.compiler.clone(),
        spec: BuildSpec::new(&native.source_ext, ""),
    };
    let mut native_units = 0;
    let native_compiled =
        walk::recurse(&root.join(&native.source_dir), &native.source_ext, |source| {
            native_units += 1;
            compile_if_stale(&cc, root, source, opts)
        })?;

    let mut report = BuildReport {
        managed_units,
        managed_compiled,
        native_units,
        native_compiled,
        ..Default::default()
    };

    // 4. Bundle, when something changed or the previous bundle is gone
    let bundle_dest = root.join(&config.bundle.name);
    if managed_compiled > 0 || (managed_units > 0 && !bundle_dest.exists()) {
        report.bundle = Some(package_bundle(root, config, &archives, opts)?);
    }

    // 5. Install the native launcher
    let binary = root.join(&native.binary);
    let installed = binary.file_name().map(|name| root.join(name));
    if let Some(installed) = installed
        && installed != binary
        && (native_compiled > 0 || (native_units > 0 && !installed.exists()))
    {
        report.binary = Some(package::install_binary(&binary, root)?);
    }

    if report.compiled() > 0 || report.bundle.is_some() || report.binary.is_some() {
        println!(
            "{} Build finished in {:.2?}",
            "✓".green(),
            start_time.elapsed()
        );
    } else if opts.verbose {
        println!("{} Up to date", "⚡".green());
    }

    Ok(report)
}

fn package_bundle(
    root: &Path,
    config: &ProjectConfig,
    archives: &[PathBuf],
    opts: &BuildOptions,
) -> Result<PathBuf> {
    let mut roots = vec![root.join(&config.managed.source_dir)];
    roots.extend(package::unpack_archives(
        root,
        archives,
        &config.bundle.extractor,
        opts,
    )?);

    let index = package::ArtifactIndex::collect(&roots, &config.managed.output_ext)?;
    let staging = root.join(&config.bundle.staging_dir);
    package::materialize(&index, &staging)?;

    let bundle = package::publish(root, &staging, &config.bundle, opts)?;
    package::relocate(&bundle, root)
}
