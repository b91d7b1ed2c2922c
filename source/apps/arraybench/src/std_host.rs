// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Host std backend running the benchmark loop on a workstation
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests in this module + `tests/host_cli.rs`
//!
//! PUBLIC API:
//!   - HostTimer: `Instant`-based monotonic timer
//!   - HostPlatform: board contract over `thread::sleep` and any `io::Write`
//!   - run_host(): binary entry; run_cli(): same over any platform
//!   - run_with(): drive any platform to completion
//!   - HostError: host-side failures
//!
//! Host cores cannot be retuned from userspace, so a clock request only
//! updates the frequency reported in result rows.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use arraybench_hal::{
    ClockControl, ClockError, Delay, LineSink, MonotonicTimer, Platform, SinkError,
    CLOCK_UNKNOWN_KHZ,
};
use thiserror::Error;

use crate::cli::Cli;
use crate::config::{ConfigError, SweepConfig};
use crate::runner::{RunError, Runner};
use crate::variants::VARIANTS;

const TARGET: &str = "arraybench-host";

/// Monotonic microseconds since construction.
#[derive(Clone, Copy, Debug)]
pub struct HostTimer {
    epoch: Instant,
}

impl HostTimer {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for HostTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicTimer for HostTimer {
    fn now_us(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Workstation stand-in for a board.
pub struct HostPlatform<W: Write = Stdout> {
    timer: HostTimer,
    /// Last requested frequency; unknown until the first request.
    clock_khz: u32,
    out: W,
}

impl HostPlatform<Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> HostPlatform<W> {
    pub fn with_writer(out: W) -> Self {
        Self { timer: HostTimer::new(), clock_khz: CLOCK_UNKNOWN_KHZ, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MonotonicTimer for HostPlatform<W> {
    fn now_us(&self) -> u64 {
        self.timer.now_us()
    }
}

impl<W: Write> ClockControl for HostPlatform<W> {
    fn set_sys_clock_khz(&mut self, khz: u32) -> Result<(), ClockError> {
        if khz == 0 {
            return Err(ClockError::Unachievable { khz });
        }
        arraybench_log::debug(TARGET, |line| {
            line.text("host clock is fixed; recording nominal ");
            line.kv_dec("khz", u64::from(khz));
        });
        self.clock_khz = khz;
        Ok(())
    }

    fn sys_clock_khz(&self) -> u32 {
        self.clock_khz
    }
}

impl<W: Write> Delay for HostPlatform<W> {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl<W: Write> LineSink for HostPlatform<W> {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{line}").and_then(|()| self.out.flush()).map_err(sink_error)
    }
}

fn sink_error(err: io::Error) -> SinkError {
    match err.kind() {
        io::ErrorKind::BrokenPipe => SinkError::Closed,
        _ => SinkError::Io,
    }
}

/// Failures surfaced by the host front-end.
#[derive(Debug, Error)]
pub enum HostError {
    /// `--variant` named something outside the benchmark table.
    #[error("unknown benchmark variant {0}")]
    UnknownVariant(String),
    /// The assembled configuration cannot drive a run.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The run stopped on an output failure.
    #[error("benchmark run failed: {0}")]
    Run(#[source] RunError),
}

/// Entry point for the `arraybench` binary.
pub fn run_host(cli: Cli) -> Result<(), HostError> {
    arraybench_log::set_max_level(cli.log_level);
    run_cli(cli, &mut HostPlatform::stdout())
}

/// Carries out `cli` on `platform`: the variant listing or a full run.
pub fn run_cli<P: Platform>(cli: Cli, platform: &mut P) -> Result<(), HostError> {
    if cli.list {
        return finish(list_variants(platform).map_err(RunError::from));
    }
    let config = cli.into_config()?;
    run_with(platform, &config)
}

/// Runs `config` to completion. A closed output channel ends the run cleanly.
pub fn run_with<P: Platform>(platform: &mut P, config: &SweepConfig) -> Result<(), HostError> {
    finish(Runner::new(platform, config).and_then(|mut runner| runner.run()))
}

fn finish(outcome: Result<(), RunError>) -> Result<(), HostError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(RunError::Sink(SinkError::Closed)) => {
            arraybench_log::debug_static(TARGET, "output closed; stopping");
            Ok(())
        }
        Err(RunError::Config(err)) => Err(HostError::Config(err)),
        Err(err) => Err(HostError::Run(err)),
    }
}

/// One `name,data_store,iter_style` line per variant.
pub fn list_variants<S: LineSink>(sink: &mut S) -> Result<(), SinkError> {
    for variant in &VARIANTS {
        sink.write_line(&format!(
            "{},{},{}",
            variant.name,
            variant.data_store.label(),
            variant.iter_style.label()
        ))?;
    }
    Ok(())
}
