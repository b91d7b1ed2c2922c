// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: arraybench host entrypoint
//! OWNERS: @runtime
//! PUBLIC API: main()
//! DEPENDS_ON: arraybench::run_host, clap
//!
//! Result rows go to stdout, diagnostics to stderr:
//! `arraybench --sweeps 1 --settle-ms 0 > results.csv`

#![forbid(unsafe_code)]

use std::process::ExitCode;

use arraybench::Cli;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match arraybench::run_host(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("arraybench: {err}");
            ExitCode::FAILURE
        }
    }
}
