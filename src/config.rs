//! Project configuration (`alco.toml`).
//!
//! The file is optional. Every field has a default matching the AlCo source
//! layout, so a bare checkout builds and tests with no configuration at all.

use crate::error::{Error, Result};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "alco.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub managed: ManagedConfig,
    pub native: NativeConfig,
    pub bundle: BundleConfig,
    pub test: TestConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ManagedConfig {
    pub source_dir: PathBuf,
    pub source_ext: String,
    pub output_ext: String,
    pub compiler: String,
    /// Directory scanned for pre-built archives to merge into the bundle.
    pub archive_dir: PathBuf,
    pub archive_ext: String,
}

impl Default for ManagedConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/java"),
            source_ext: ".java".to_string(),
            output_ext: ".class".to_string(),
            compiler: "javac".to_string(),
            archive_dir: PathBuf::from("jars"),
            archive_ext: ".jar".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct NativeConfig {
    pub source_dir: PathBuf,
    pub source_ext: String,
    pub compiler: String,
    /// Compiled launcher copied into the project root after a build.
    pub binary: PathBuf,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/c"),
            source_ext: ".c".to_string(),
            compiler: "cc".to_string(),
            binary: PathBuf::from("src/c/alco"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    pub staging_dir: PathBuf,
    pub name: String,
    pub entry_point: String,
    pub entry_roots: Vec<String>,
    pub extractor: Vec<String>,
    pub archiver: Vec<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("build/jar"),
            name: "alco.jar".to_string(),
            entry_point: "me.pavlina.alco.compiler.Compiler".to_string(),
            entry_roots: vec!["me".to_string(), "com".to_string()],
            extractor: vec!["jar".to_string(), "xf".to_string()],
            archiver: vec!["jar".to_string(), "cef".to_string()],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct TestConfig {
    pub fixture_dir: PathBuf,
    pub fixture_ext: String,
    /// Command prefix for the compile phase; the fixture path and the
    /// fixture's COMPILE arguments are appended.
    pub compiler: Vec<String>,
    pub helpers: Vec<PathBuf>,
    pub helper_compiler: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            fixture_dir: PathBuf::from("test"),
            fixture_ext: ".al".to_string(),
            compiler: [
                "./alco",
                "-path=runtime-32:Doxyfile",
                "-path=runtime-64:Doxyfile",
                "test/helpers.o",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            helpers: vec![PathBuf::from("test/helpers.c")],
            helper_compiler: "clang".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Reject configurations no command could run with.
    pub fn validate(&self) -> Result<()> {
        let commands = [
            ("bundle.extractor", &self.bundle.extractor),
            ("bundle.archiver", &self.bundle.archiver),
            ("test.compiler", &self.test.compiler),
        ];
        for (key, argv) in commands {
            if argv.is_empty() {
                return Err(Error::InvalidConfig(format!("{key} must not be empty")));
            }
        }
        // The staging tree is wiped before every merge.
        let staging = &self.bundle.staging_dir;
        let inside_root = staging.components().count() > 0
            && staging
                .components()
                .all(|c| matches!(c, std::path::Component::Normal(_)));
        if !inside_root {
            return Err(Error::InvalidConfig(format!(
                "bundle.staging_dir {} must be a subdirectory of the project",
                staging.display()
            )));
        }
        if self.managed.source_ext.is_empty() {
            return Err(Error::InvalidConfig(
                "managed.source_ext must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load `alco.toml` from `root`, falling back to defaults when it is absent.
pub fn load_config(root: &Path) -> anyhow::Result<ProjectConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config.managed.source_ext, ".java");
        assert_eq!(config.bundle.entry_roots, vec!["me", "com"]);
        assert_eq!(config.test.compiler[0], "./alco");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let config: ProjectConfig = toml::from_str(
            r#"
[bundle]
name = "other.jar"
"#,
        )
        .unwrap();
        assert_eq!(config.bundle.name, "other.jar");
        assert_eq!(config.bundle.staging_dir, PathBuf::from("build/jar"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: std::result::Result<ProjectConfig, _> = toml::from_str(
            r#"
[managed]
sauce_dir = "src"
"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_command_is_invalid() {
        let config: ProjectConfig = toml::from_str(
            r#"
[test]
compiler = []
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("test.compiler"));
    }

    #[test]
    fn test_staging_outside_project_is_invalid() {
        for staging in [".", "..", "/tmp/stage", "build/../.."] {
            let mut config = ProjectConfig::default();
            config.bundle.staging_dir = PathBuf::from(staging);
            assert!(config.validate().is_err(), "{staging} should be rejected");
        }
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.native.compiler, "cc");
    }
}
