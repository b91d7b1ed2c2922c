// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Frequency sweep and benchmark sweep drivers
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests in this module + `tests/sweep_output.rs`
//!
//! INVARIANTS:
//!   - Frequencies and variants are visited in configuration order
//!   - The `default` frequency never issues a clock request
//!   - A refused frequency is skipped, never retried within the sweep
//!   - Exactly `runs_per_test` rows per (frequency, variant) pair that ran
//!   - A checksum mismatch is reported and the run continues

use alloc::vec::Vec;
use core::fmt;

use arraybench_hal::{Platform, SinkError, CLOCK_UNKNOWN_KHZ};

use crate::config::{ConfigError, FrequencyTarget, SweepConfig, CORE_ID};
use crate::report;
use crate::variants::{self, Variant};

const TARGET: &str = "arraybench";

/// Counters for one pass over all frequencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// 0-based index, as printed on the `# sweep` line.
    pub sweep: u32,
    pub rows: u32,
    pub mismatches: u32,
    pub skipped_frequencies: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// The configuration cannot drive a run.
    Config(ConfigError),
    /// Output could not be delivered.
    Sink(SinkError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Sink(err) => write!(f, "output failed: {err}"),
        }
    }
}

impl core::error::Error for RunError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Sink(err) => Some(err),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SinkError> for RunError {
    fn from(err: SinkError) -> Self {
        Self::Sink(err)
    }
}

/// Drives the benchmark table across the configured frequencies.
pub struct Runner<'a, P: Platform> {
    platform: &'a mut P,
    config: &'a SweepConfig,
    variants: Vec<&'static Variant>,
    sweeps_done: u32,
}

impl<'a, P: Platform> Runner<'a, P> {
    /// Validates `config` and resolves its variant names.
    pub fn new(platform: &'a mut P, config: &'a SweepConfig) -> Result<Self, RunError> {
        config.validate()?;
        let variants = config.variants.iter().filter_map(|name| variants::find(name)).collect();
        Ok(Self { platform, config, variants, sweeps_done: 0 })
    }

    /// Completed sweeps so far.
    pub fn sweeps_done(&self) -> u32 {
        self.sweeps_done
    }

    /// Emits the banner and waits for the console to settle.
    pub fn start(&mut self) -> Result<(), RunError> {
        self.platform.write_line(report::BANNER)?;
        arraybench_log::info(TARGET, |line| {
            line.text("start ");
            line.kv_dec("variants", self.variants.len() as u64);
            line.text(" ");
            line.kv_dec("frequencies", self.config.frequencies.len() as u64);
            line.text(" ");
            line.kv_dec("runs", u64::from(self.config.runs_per_test));
        });
        pause(&mut *self.platform, self.config.startup_settle_ms);
        Ok(())
    }

    /// One pass: every frequency, every variant, `runs_per_test` rows each.
    pub fn run_sweep(&mut self) -> Result<SweepSummary, RunError> {
        let config = self.config;
        let platform = &mut *self.platform;
        let mut summary = SweepSummary { sweep: self.sweeps_done, ..SweepSummary::default() };

        platform.write_line(&report::sweep_line(summary.sweep))?;
        platform.write_line(report::CSV_HEADER)?;

        for &target in &config.frequencies {
            if !apply_frequency(platform, config, target, &mut summary)? {
                continue;
            }
            let khz = platform.sys_clock_khz();
            if khz == CLOCK_UNKNOWN_KHZ {
                platform.write_line(report::CLOCK_UNKNOWN)?;
            }
            for &variant in &self.variants {
                run_variant(platform, config, variant, khz, &mut summary)?;
                pause(platform, config.inter_variant_delay_ms);
            }
        }

        self.sweeps_done += 1;
        arraybench_log::info(TARGET, |line| {
            line.text("sweep done ");
            line.kv_dec("sweep", u64::from(summary.sweep));
            line.text(" ");
            line.kv_dec("rows", u64::from(summary.rows));
            line.text(" ");
            line.kv_dec("mismatches", u64::from(summary.mismatches));
            line.text(" ");
            line.kv_dec("skipped", u64::from(summary.skipped_frequencies));
        });
        Ok(summary)
    }

    /// `start`, then sweeps until `config.sweeps` is reached (forever if unset).
    pub fn run(&mut self) -> Result<(), RunError> {
        self.start()?;
        loop {
            self.run_sweep()?;
            if self.config.sweeps.is_some_and(|limit| self.sweeps_done >= limit) {
                return Ok(());
            }
            pause(&mut *self.platform, self.config.inter_sweep_delay_ms);
        }
    }
}

/// Returns whether benchmarks should run at `target`.
fn apply_frequency<P: Platform>(
    platform: &mut P,
    config: &SweepConfig,
    target: FrequencyTarget,
    summary: &mut SweepSummary,
) -> Result<bool, RunError> {
    let khz = match target {
        FrequencyTarget::Default => return Ok(true),
        FrequencyTarget::Khz(khz) => khz,
    };
    match platform.set_sys_clock_khz(khz) {
        Ok(()) => {
            pause(platform, config.clock_settle_ms);
            arraybench_log::debug(TARGET, |line| {
                line.text("clock ");
                line.kv_dec("requested_khz", u64::from(khz));
                line.text(" ");
                line.kv_dec("actual_khz", u64::from(platform.sys_clock_khz()));
            });
            Ok(true)
        }
        Err(err) => {
            arraybench_log::warn(TARGET, |line| {
                line.text("clock switch refused ");
                line.kv_dec("khz", u64::from(khz));
                line.text(" ");
                line.fmt(format_args!("reason={err}"));
            });
            platform.write_line(&report::skip_line(khz, err))?;
            summary.skipped_frequencies += 1;
            Ok(false)
        }
    }
}

fn run_variant<P: Platform>(
    platform: &mut P,
    config: &SweepConfig,
    variant: &Variant,
    khz: u32,
    summary: &mut SweepSummary,
) -> Result<(), RunError> {
    platform.write_line(&report::variant_header(variant, CORE_ID, khz))?;
    for run in 0..config.runs_per_test {
        let record = variant.run(&*platform);
        platform.write_line(&report::result_row(variant, CORE_ID, khz, run, &record))?;
        summary.rows += 1;
        if !record.checksum_ok() {
            summary.mismatches += 1;
            arraybench_log::warn(TARGET, |line| {
                line.kv_literal("checksum mismatch variant", variant.name);
                line.text(" ");
                line.kv_dec("run", u64::from(run));
            });
            platform.write_line(&report::mismatch_line(variant, run, &record))?;
        }
    }
    Ok(())
}

fn pause<P: Platform>(platform: &mut P, ms: u32) {
    if ms > 0 {
        platform.delay_ms(ms);
    }
}
