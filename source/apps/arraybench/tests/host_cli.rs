// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command line to configuration to host output.

#![cfg(feature = "std")]

use arraybench::config::{ConfigError, FrequencyTarget};
use arraybench::report::{parse_row, CLOCK_UNKNOWN};
use arraybench::{run_with, Cli, HostError, HostPlatform};
use clap::Parser;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("arraybench").chain(args.iter().copied()))
        .expect("arguments parse")
}

#[test]
fn zero_frequency_is_rejected() {
    let err = cli(&["--freq", "0"]).into_config().unwrap_err();
    assert!(matches!(err, HostError::Config(ConfigError::ZeroFrequency)));
}

#[test]
fn zero_sweeps_are_rejected() {
    let err = cli(&["--sweeps", "0"]).into_config().unwrap_err();
    assert!(matches!(err, HostError::Config(ConfigError::ZeroSweeps)));
}

#[test]
fn list_flag_parses_without_other_arguments() {
    assert!(cli(&["--list"]).list);
}

#[test]
fn cli_driven_host_run() {
    let config = cli(&[
        "--freq",
        "default,48000",
        "--variant",
        "array_adapter,vec_index",
        "--runs",
        "3",
        "--sweeps",
        "1",
        "--settle-ms",
        "0",
        "--clock-settle-ms",
        "0",
        "--variant-delay-ms",
        "0",
        "--sweep-delay-ms",
        "0",
    ])
    .into_config()
    .unwrap();
    assert_eq!(config.frequencies, vec![FrequencyTarget::Default, FrequencyTarget::Khz(48_000)]);

    let mut platform = HostPlatform::with_writer(Vec::new());
    run_with(&mut platform, &config).unwrap();
    let out = String::from_utf8(platform.into_inner()).unwrap();

    let rows: Vec<_> = out.lines().filter_map(|line| parse_row(line).ok()).collect();
    assert_eq!(rows.len(), 2 * 2 * 3);
    // Host clock is unknown until the first request.
    assert!(rows[..6].iter().all(|row| row.freq_khz == 0));
    assert_eq!(out.lines().filter(|line| *line == CLOCK_UNKNOWN).count(), 1);
    assert!(out
        .lines()
        .filter(|line| line.starts_with("# Running benchmark"))
        .take(2)
        .all(|line| line.contains("clock unknown")));
    assert!(rows[6..].iter().all(|row| row.freq_khz == 48_000));
    assert!(rows.iter().all(|row| row.record().checksum_ok()));
    assert_eq!(rows[0].name, "array_adapter");
    assert_eq!(rows[3].name, "vec_index");
}
