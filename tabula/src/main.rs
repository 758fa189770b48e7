//! Tabula binary.
//!
//! Exit status: `0` success, `1` runtime failure, `2` invalid input.

use anyhow::Context;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let report = runtime.block_on(tabula::run(std::env::args_os()));
    report.print();
    Ok(ExitCode::from(report.exit_code))
}
