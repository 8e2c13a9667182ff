//! # alb - AlCo build orchestrator and fixture harness
//!
//! `alb` builds a compiler project that mixes two toolchains: a managed one
//! (`javac`) whose class files are bundled with pre-built jars into
//! `alco.jar`, and a native one (`cc`) that produces the `alco` launcher.
//! It also runs the project's fixture tests against the produced compiler.
//!
//! ## Quick Start
//!
//! ```bash
//! # Recompile what changed and rebuild the bundle
//! alb build --verbose
//!
//! # Run every fixture in test/, stopping at the first failure
//! alb test
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Staleness checks, compiler invocation, the build pipeline
//! - [`package`] - Archive unpacking, artifact merging, bundle publishing
//! - [`harness`] - Fixture header parsing and compile/run comparison
//! - [`config`] - Configuration parsing (`alco.toml`)
//! - [`error`] - Error types shared by all of the above

/// Incremental compilation of managed and native sources.
pub mod build;

/// Configuration file parsing (`alco.toml`).
pub mod config;

/// Error taxonomy.
pub mod error;

/// Fixture test harness.
pub mod harness;

/// Bundle assembly from loose artifacts and pre-built archives.
pub mod package;

/// External tool invocation.
pub mod process;

pub use error::{Error, HeaderError, Result};
