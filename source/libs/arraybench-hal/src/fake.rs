// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deterministic in-memory platform for host tests.
//!
//! Time only moves when it is observed: every timer read advances the clock
//! by a fixed tick and every delay advances it by the delay length.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;

use crate::{ClockControl, ClockError, Delay, LineSink, MonotonicTimer, SinkError};

/// Boot clock reported before any switch.
pub const DEFAULT_BOOT_KHZ: u32 = 125_000;
/// Highest frequency accepted unless overridden.
pub const DEFAULT_MAX_KHZ: u32 = 200_000;

/// Simulated board.
#[derive(Debug)]
pub struct FakePlatform {
    now_us: Cell<u64>,
    tick_us: u64,
    clock_khz: u32,
    max_khz: u32,
    close_after: Option<usize>,
    lines: Vec<String>,
    delays: Vec<u32>,
    clock_requests: Vec<u32>,
}

impl FakePlatform {
    /// Creates a platform whose timer advances `tick_us` per read.
    pub fn new(tick_us: u64) -> Self {
        Self {
            now_us: Cell::new(0),
            tick_us,
            clock_khz: DEFAULT_BOOT_KHZ,
            max_khz: DEFAULT_MAX_KHZ,
            close_after: None,
            lines: Vec::new(),
            delays: Vec::new(),
            clock_requests: Vec::new(),
        }
    }

    /// Boots with the core clock at `khz` instead of [`DEFAULT_BOOT_KHZ`].
    pub fn with_boot_khz(mut self, khz: u32) -> Self {
        self.clock_khz = khz;
        self
    }

    /// Rejects every clock request above `khz`.
    pub fn with_max_khz(mut self, khz: u32) -> Self {
        self.max_khz = khz;
        self
    }

    /// Makes the sink report [`SinkError::Closed`] once `lines` lines were accepted.
    pub fn with_close_after(mut self, lines: usize) -> Self {
        self.close_after = Some(lines);
        self
    }

    /// Lines written so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Delays requested so far, in milliseconds.
    pub fn delays(&self) -> &[u32] {
        &self.delays
    }

    /// Every frequency passed to [`ClockControl::set_sys_clock_khz`], accepted or not.
    pub fn clock_requests(&self) -> &[u32] {
        &self.clock_requests
    }

    /// Current simulated time without advancing it.
    pub fn peek_us(&self) -> u64 {
        self.now_us.get()
    }
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MonotonicTimer for FakePlatform {
    fn now_us(&self) -> u64 {
        let now = self.now_us.get().saturating_add(self.tick_us);
        self.now_us.set(now);
        now
    }
}

impl ClockControl for FakePlatform {
    fn set_sys_clock_khz(&mut self, khz: u32) -> Result<(), ClockError> {
        self.clock_requests.push(khz);
        if khz == 0 || khz > self.max_khz {
            return Err(ClockError::Unachievable { khz });
        }
        self.clock_khz = khz;
        Ok(())
    }

    fn sys_clock_khz(&self) -> u32 {
        self.clock_khz
    }
}

impl Delay for FakePlatform {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        let now = self.now_us.get().saturating_add(u64::from(ms) * 1_000);
        self.now_us.set(now);
    }
}

impl LineSink for FakePlatform {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        if self.close_after.is_some_and(|limit| self.lines.len() >= limit) {
            return Err(SinkError::Closed);
        }
        self.lines.push(line.to_string());
        Ok(())
    }
}
