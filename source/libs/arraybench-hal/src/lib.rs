// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]

//! CONTEXT: Platform contract between the benchmark loop and the board
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests in this crate + `tests/platform.rs`
//!
//! PUBLIC API: MonotonicTimer, ClockControl, Delay, LineSink, Platform, elapsed_us
//! INVARIANTS: Timer is monotonic; clock switches block until stable; one call emits one line
//!
//! The trait surface needs neither `alloc` nor `std`. The `fake` feature adds
//! an in-memory board for host tests and is never enabled by board builds.

#[cfg(any(test, feature = "fake"))]
extern crate alloc;

use core::fmt;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

/// Reported by [`ClockControl::sys_clock_khz`] when the core clock is not known.
pub const CLOCK_UNKNOWN_KHZ: u32 = 0;

/// Monotonic microsecond time source.
pub trait MonotonicTimer {
    /// Microseconds since an arbitrary fixed epoch. Never decreases.
    fn now_us(&self) -> u64;
}

/// Core clock frequency control.
pub trait ClockControl {
    /// Switches the core clock to `khz`, returning once the new clock is stable.
    fn set_sys_clock_khz(&mut self, khz: u32) -> Result<(), ClockError>;

    /// Current core clock in kHz, or [`CLOCK_UNKNOWN_KHZ`] when it cannot be read.
    fn sys_clock_khz(&self) -> u32;
}

/// Blocking delay primitive.
pub trait Delay {
    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Line-oriented output channel (serial console, stdout, ...).
pub trait LineSink {
    /// Writes `line` followed by a line terminator.
    fn write_line(&mut self, line: &str) -> Result<(), SinkError>;
}

/// Everything the benchmark loop needs from a board.
pub trait Platform: MonotonicTimer + ClockControl + Delay + LineSink {}

impl<T: MonotonicTimer + ClockControl + Delay + LineSink> Platform for T {}

/// Reasons a clock switch can be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockError {
    /// The PLL cannot synthesize the requested frequency.
    Unachievable {
        /// Requested frequency.
        khz: u32,
    },
    /// The platform has no clock control at all.
    Unsupported,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unachievable { khz } => write!(f, "{khz} kHz is not achievable"),
            Self::Unsupported => f.write_str("clock control unsupported"),
        }
    }
}

impl core::error::Error for ClockError {}

/// Output channel failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkError {
    /// The reader went away.
    Closed,
    /// Any other write failure.
    Io,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("output channel closed"),
            Self::Io => f.write_str("output channel write failed"),
        }
    }
}

impl core::error::Error for SinkError {}

/// Microseconds between two timer readings; zero if `end` precedes `start`.
#[inline]
pub const fn elapsed_us(start: u64, end: u64) -> u64 {
    end.saturating_sub(start)
}
