//! Fixture directive headers.
//!
//! A fixture starts with a block of `// TAG value` lines describing how to
//! compile and run it and what output to expect:
//!
//! ```text
//! // NAME Integer addition
//! // COMPILE ["-o", "test/add"]
//! // DELETE test/add
//! // RUN test/add
//! // POUT 3
//! ```
//!
//! The block ends at the first line that is not a directive. A `// ` line
//! whose first word is all capitals is always read as a directive, so prose
//! comments must not start with one (`// NOTE ...` and `// I think ...` are
//! rejected as unknown tags). Start them lowercase instead.

use crate::error::{Error, HeaderError, IoContext, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^// ([A-Z]+)(?: (.*))?$").expect("directive pattern"));

/// Expected observable behaviour of one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectation {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSpec {
    pub name: String,
    /// Extra arguments appended after the fixture path.
    pub compile_args: Vec<String>,
    /// Paths removed after the fixture finishes, pass or fail.
    pub delete: Vec<PathBuf>,
    /// Program to execute after a successful compile phase.
    pub run: Option<PathBuf>,
    pub compile: Expectation,
    pub program: Expectation,
}

/// Read and parse the header of the fixture at `path`.
pub fn read_spec(path: &Path) -> Result<TestSpec> {
    let text = fs::read_to_string(path).at(path)?;
    parse_header(path, &text)
}

/// Parse the directive block at the top of `text`.
///
/// `fixture` is used for the default display name and in error messages.
pub fn parse_header(fixture: &Path, text: &str) -> Result<TestSpec> {
    let mut spec = TestSpec::default();
    let mut seen = HashSet::new();
    let mut name = None;

    for (idx, raw) in text.lines().enumerate() {
        let Some(caps) = DIRECTIVE.captures(raw.trim()) else {
            break;
        };
        let tag = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());

        apply(&mut spec, &mut name, &mut seen, tag, rest).map_err(|reason| Error::Header {
            fixture: fixture.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
    }

    spec.name = name.unwrap_or_else(|| {
        fixture
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    Ok(spec)
}

fn apply<'a>(
    spec: &mut TestSpec,
    name: &mut Option<String>,
    seen: &mut HashSet<&'a str>,
    tag: &'a str,
    rest: &str,
) -> std::result::Result<(), HeaderError> {
    let single = matches!(tag, "NAME" | "COMPILE" | "RUN" | "CEXIT" | "PEXIT");
    if single && !seen.insert(tag) {
        return Err(HeaderError::DuplicateTag(tag.to_string()));
    }
    let needs_value = single || tag == "DELETE";
    if needs_value && rest.is_empty() {
        return Err(HeaderError::MissingValue(tag.to_string()));
    }

    match tag {
        "NAME" => *name = Some(rest.to_string()),
        "COMPILE" => {
            spec.compile_args =
                serde_json::from_str(rest).map_err(HeaderError::InvalidArguments)?;
        }
        "DELETE" => spec.delete.push(PathBuf::from(rest)),
        "RUN" => spec.run = Some(PathBuf::from(rest)),
        "COUT" => push_line(&mut spec.compile.stdout, rest),
        "CERR" => push_line(&mut spec.compile.stderr, rest),
        "CEXIT" => spec.compile.exit_code = exit_code(rest)?,
        "POUT" => push_line(&mut spec.program.stdout, rest),
        "PERR" => push_line(&mut spec.program.stderr, rest),
        "PEXIT" => spec.program.exit_code = exit_code(rest)?,
        other => return Err(HeaderError::UnknownTag(other.to_string())),
    }
    Ok(())
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

fn exit_code(rest: &str) -> std::result::Result<i32, HeaderError> {
    rest.trim()
        .parse()
        .map_err(|_| HeaderError::InvalidExitCode(rest.to_string()))
}
