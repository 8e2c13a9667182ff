use crate::build::{BuildSpec, is_stale, output_path};
use crate::config::TestConfig;
use crate::error::{Error, Result};
use crate::process;
use std::io;
use std::path::Path;
use std::process::Command;

/// Compile the C helper sources that fixtures link against into position
/// independent objects (`helpers.c` -> `helpers.o`), skipping up-to-date ones.
pub fn compile_helpers(root: &Path, config: &TestConfig) -> Result<usize> {
    let spec = BuildSpec::new(".c", ".o");
    let mut compiled = 0;

    for helper in &config.helpers {
        let source = root.join(helper);
        if !source.is_file() {
            return Err(Error::Io {
                path: source,
                source: io::Error::new(io::ErrorKind::NotFound, "helper source not found"),
            });
        }
        if !is_stale(&source, &spec)? {
            continue;
        }

        let object = output_path(helper, &spec)?;
        let mut cmd = Command::new(process::resolve_program(root, &config.helper_compiler));
        cmd.args(["-fPIC", "-c"])
            .arg(helper)
            .arg("-o")
            .arg(&object)
            .current_dir(root);
        process::run_checked(&mut cmd, &object.to_string_lossy(), false)?;
        compiled += 1;
    }

    Ok(compiled)
}
