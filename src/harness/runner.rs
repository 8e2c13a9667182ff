use super::header::{Expectation, TestSpec, read_spec};
use super::{FixtureOutcome, RunSummary, TestResult, helpers};
use crate::config::TestConfig;
use crate::error::{IoContext, Result};
use crate::process;
use colored::*;
use console::Term;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

const NAME_WIDTH: usize = 70;

/// Compile helper objects, then run every fixture in name order, stopping at
/// the first failure.
pub fn run_fixtures(root: &Path, config: &TestConfig) -> Result<RunSummary> {
    helpers::compile_helpers(root, config)?;

    let fixtures = list_fixtures(root, config)?;
    let mut summary = RunSummary {
        total: fixtures.len(),
        ..Default::default()
    };
    if fixtures.is_empty() {
        println!(
            "{} No {} fixtures found in {}/",
            "!".yellow(),
            config.fixture_ext,
            config.fixture_dir.display()
        );
        return Ok(summary);
    }

    let mut term = Term::stderr();
    for fixture in fixtures {
        let spec = read_spec(&root.join(&fixture))?;
        let _ = term.write_str(&format!("{:<width$}", spec.name, width = NAME_WIDTH));

        let result = run_fixture(root, config, &fixture, &spec)?;
        match &result {
            TestResult::Pass => {
                let _ = term.write_line(&format!(" [ {} ]", "PASS".green()));
            }
            TestResult::Fail(text) => {
                let _ = term.write_line(&format!(" [ {} ]", "FAIL".red()));
                let _ = term.write_all(text);
            }
        }

        let failed = result.is_fail();
        summary.outcomes.push(FixtureOutcome {
            name: spec.name,
            fixture,
            result,
        });
        if failed {
            break;
        }
    }

    Ok(summary)
}

/// Fixture files directly inside the fixture directory, sorted by name.
///
/// Paths are `./`-prefixed and relative to `root` (`./test/a.al`). The
/// compiler sees them in that form and prints them in its diagnostics.
pub fn list_fixtures(root: &Path, config: &TestConfig) -> Result<Vec<PathBuf>> {
    let dir = root.join(&config.fixture_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&dir).at(&dir)? {
        let entry = entry.at(&dir)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(&config.fixture_ext) && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| Path::new(".").join(&config.fixture_dir).join(name))
        .collect())
}

/// Execute one parsed fixture. Its DELETE paths are removed exactly once
/// before returning, whatever the outcome.
pub fn run_fixture(
    root: &Path,
    config: &TestConfig,
    fixture: &Path,
    spec: &TestSpec,
) -> Result<TestResult> {
    let result = execute(root, config, fixture, spec);
    cleanup(root, &spec.delete);
    result
}

fn execute(root: &Path, config: &TestConfig, fixture: &Path, spec: &TestSpec) -> Result<TestResult> {
    // Compile phase
    let mut compiler = process::command_from_argv(root, &config.compiler)?;
    compiler.arg(fixture).args(&spec.compile_args);
    if let Some(text) = run_phase(root, &mut compiler, &spec.compile) {
        return Ok(TestResult::Fail(text));
    }

    // Run phase
    if let Some(run) = &spec.run {
        let mut program = Command::new(process::resolve_program(root, &run.to_string_lossy()));
        if let Some(text) = run_phase(root, &mut program, &spec.program) {
            return Ok(TestResult::Fail(text));
        }
    }

    Ok(TestResult::Pass)
}

/// Run one phase to completion and compare it against `want`; returns the
/// failure diagnostic, if any.
fn run_phase(root: &Path, cmd: &mut Command, want: &Expectation) -> Option<Vec<u8>> {
    let output = cmd
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match output {
        Ok(output) => check_output(&output, want),
        Err(e) => Some(
            format!(
                "FAILED TO EXECUTE {}: {}\n",
                cmd.get_program().to_string_lossy(),
                e
            )
            .into_bytes(),
        ),
    }
}

/// Exit code as a fixture states it. On unix a phase killed by signal N
/// reports `-N`.
pub fn exit_code(status: &ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.code().or_else(|| status.signal().map(|signal| -signal))
    }
    #[cfg(not(unix))]
    {
        status.code()
    }
}

/// Compare a finished phase against its expectation: exit code first, then
/// both streams byte for byte. The diagnostic carries the captured bytes
/// unchanged.
pub fn check_output(output: &Output, want: &Expectation) -> Option<Vec<u8>> {
    let headline = match exit_code(&output.status) {
        Some(code) if code != want.exit_code => {
            format!("GOT EXIT CODE {} (WANTED {})", code, want.exit_code)
        }
        None => format!(
            "GOT NO EXIT CODE, {} (WANTED {})",
            output.status, want.exit_code
        ),
        Some(_)
            if output.stdout != want.stdout.as_bytes()
                || output.stderr != want.stderr.as_bytes() =>
        {
            "INCORRECT OUTPUT".to_string()
        }
        Some(_) => return None,
    };

    let mut text = format!("{headline}\n").into_bytes();
    text.extend_from_slice(&output.stdout);
    text.extend_from_slice(&output.stderr);
    Some(text)
}

fn cleanup(root: &Path, paths: &[PathBuf]) {
    for path in paths {
        let path = root.join(path);
        if path.is_dir() {
            let _ = fs::remove_dir_all(&path);
        } else {
            let _ = fs::remove_file(&path);
        }
    }
}
