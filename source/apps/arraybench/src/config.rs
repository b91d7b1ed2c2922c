// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed benchmark parameters and the sweep configuration derived from them.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::variants::{self, VARIANTS};

/// Number of `i32` elements every variant fills and sums.
pub const ARRAY_LEN: usize = 8192;
/// Fill value.
pub const THE_NUMBER: i32 = 123;
/// Sum every variant must produce.
pub const EXPECTED_TOTAL: i32 = ARRAY_LEN as i32 * THE_NUMBER;
/// Bytes occupied by one buffer.
pub const BUFFER_BYTES: usize = ARRAY_LEN * core::mem::size_of::<i32>();

/// Result rows emitted per variant per frequency.
pub const RUNS_PER_TEST: u32 = 10;
/// Wait after console bring-up so a host can attach.
pub const STARTUP_SETTLE_MS: u32 = 5_000;
/// Extra wait after a clock switch before the console is trusted again.
pub const CLOCK_SETTLE_MS: u32 = 100;
/// Pause between two variants.
pub const INTER_VARIANT_DELAY_MS: u32 = 1_000;
/// Pause between two full frequency sweeps.
pub const INTER_SWEEP_DELAY_MS: u32 = 10_000;
/// The loop only ever runs on the boot core.
pub const CORE_ID: u32 = 0;

/// Frequencies visited by every sweep, in order.
pub const TARGET_FREQUENCIES: [FrequencyTarget; 5] = [
    FrequencyTarget::Default,
    FrequencyTarget::Khz(25_000),
    FrequencyTarget::Khz(125_000), // RP2040 default
    FrequencyTarget::Khz(133_000), // RP2040 rated maximum
    FrequencyTarget::Khz(200_000), // common overclock
];

/// One entry of the frequency sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrequencyTarget {
    /// Leave the core clock as it is.
    Default,
    /// Switch the core clock to this many kHz.
    Khz(u32),
}

impl fmt::Display for FrequencyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Khz(khz) => write!(f, "{khz}"),
        }
    }
}

/// Rejected frequency literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyParseError;

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected `default` or a frequency in kHz")
    }
}

impl core::error::Error for FrequencyParseError {}

impl FromStr for FrequencyTarget {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("default") {
            return Ok(Self::Default);
        }
        let mut khz: u32 = 0;
        let mut digits = 0usize;
        for ch in s.chars() {
            if ch == '_' {
                continue;
            }
            let digit = ch.to_digit(10).ok_or(FrequencyParseError)?;
            khz = khz
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(FrequencyParseError)?;
            digits += 1;
        }
        if digits == 0 {
            return Err(FrequencyParseError);
        }
        Ok(Self::Khz(khz))
    }
}

/// Reasons a [`SweepConfig`] cannot drive a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `runs_per_test` is zero.
    ZeroRuns,
    /// `sweeps` is `Some(0)`.
    ZeroSweeps,
    /// No frequency to visit.
    NoFrequencies,
    /// `Khz(0)` collides with the "leave as default" sentinel.
    ZeroFrequency,
    /// No variant selected.
    NoVariants,
    /// A selected variant name is not in the table.
    UnknownVariant(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRuns => f.write_str("runs per test must be at least 1"),
            Self::ZeroSweeps => f.write_str("sweep count must be at least 1"),
            Self::NoFrequencies => f.write_str("frequency list is empty"),
            Self::ZeroFrequency => f.write_str("0 kHz is not a frequency; use `default`"),
            Self::NoVariants => f.write_str("no benchmark variant selected"),
            Self::UnknownVariant(name) => write!(f, "unknown benchmark variant {name}"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Everything the runner needs to know about one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    pub frequencies: Vec<FrequencyTarget>,
    /// Variant names, in run order.
    pub variants: Vec<&'static str>,
    pub runs_per_test: u32,
    pub startup_settle_ms: u32,
    pub clock_settle_ms: u32,
    pub inter_variant_delay_ms: u32,
    pub inter_sweep_delay_ms: u32,
    /// Number of full sweeps; `None` repeats forever.
    pub sweeps: Option<u32>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            frequencies: TARGET_FREQUENCIES.to_vec(),
            variants: VARIANTS.iter().map(|variant| variant.name).collect(),
            runs_per_test: RUNS_PER_TEST,
            startup_settle_ms: STARTUP_SETTLE_MS,
            clock_settle_ms: CLOCK_SETTLE_MS,
            inter_variant_delay_ms: INTER_VARIANT_DELAY_MS,
            inter_sweep_delay_ms: INTER_SWEEP_DELAY_MS,
            sweeps: None,
        }
    }
}

impl SweepConfig {
    /// Same pacing as the board defaults but without any waiting.
    pub fn without_delays(mut self) -> Self {
        self.startup_settle_ms = 0;
        self.clock_settle_ms = 0;
        self.inter_variant_delay_ms = 0;
        self.inter_sweep_delay_ms = 0;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs_per_test == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if self.sweeps == Some(0) {
            return Err(ConfigError::ZeroSweeps);
        }
        if self.frequencies.is_empty() {
            return Err(ConfigError::NoFrequencies);
        }
        if self.frequencies.contains(&FrequencyTarget::Khz(0)) {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.variants.is_empty() {
            return Err(ConfigError::NoVariants);
        }
        for &name in &self.variants {
            if variants::find(name).is_none() {
                return Err(ConfigError::UnknownVariant(name));
            }
        }
        Ok(())
    }
}
