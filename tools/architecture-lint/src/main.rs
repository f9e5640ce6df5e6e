//! Checks the layer boundaries of the `client` crate.
//!
//! Usage: `architecture-lint [CRATE_DIR]`. Without an argument the crate is
//! found as `client/` beside this tool's workspace.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn default_crate_dir() -> PathBuf {
    // tools/architecture-lint -> workspace root -> client
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("client")
}

fn main() -> ExitCode {
    let crate_dir = env::args_os()
        .nth(1)
        .map_or_else(default_crate_dir, PathBuf::from);
    if !crate_dir.join("src").is_dir() {
        let _ = writeln!(
            io::stderr().lock(),
            "no crate sources under {}",
            crate_dir.display()
        );
        return ExitCode::FAILURE;
    }

    if let Err(err) = architecture_lint::lint_crate_sources(&crate_dir) {
        let _ = writeln!(io::stderr().lock(), "{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
