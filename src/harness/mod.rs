//! Fixture-driven test harness for the produced compiler.
//!
//! Each fixture in `test/` carries a directive header (see [`header`]). The
//! harness compiles it with the produced compiler, optionally runs the
//! resulting program, and compares exit codes and output exactly. The first
//! failing fixture ends the whole run.

pub mod header;
pub mod helpers;
pub mod runner;

pub use header::{Expectation, TestSpec, parse_header, read_spec};
pub use runner::{list_fixtures, run_fixture, run_fixtures};

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    /// Diagnostic headline followed by both captured streams, as raw bytes.
    Fail(Vec<u8>),
}

impl TestResult {
    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail(_))
    }
}

#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    pub name: String,
    pub fixture: PathBuf,
    pub result: TestResult,
}

/// The fixtures that actually ran, in order. After a failure the remaining
/// fixtures are absent.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Fixtures discovered, including any skipped after a failure.
    pub total: usize,
    pub outcomes: Vec<FixtureOutcome>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.result.is_fail()).count()
    }

    pub fn failure(&self) -> Option<&FixtureOutcome> {
        self.outcomes.iter().find(|o| o.result.is_fail())
    }

    pub fn is_success(&self) -> bool {
        self.failure().is_none()
    }
}
