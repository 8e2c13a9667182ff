mod clean;
mod core;
pub mod compile;
pub mod stale;
pub mod walk;

pub use clean::clean;
pub use compile::{Toolchain, compile, compile_if_stale};
pub use self::core::{BuildReport, build_project};
pub use stale::{BuildSpec, is_stale, output_path};

/// Presence of this variable (any value) adds debug symbols to managed builds.
pub const DEBUG_ENV: &str = "DEBUG";

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Echo full command lines instead of just the file being processed.
    pub verbose: bool,
    pub debug: bool,
}

impl BuildOptions {
    /// Options for a CLI run, reading [`DEBUG_ENV`] once.
    pub fn from_env(verbose: bool) -> Self {
        Self {
            verbose,
            debug: std::env::var_os(DEBUG_ENV).is_some(),
        }
    }
}
