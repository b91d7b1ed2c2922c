// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! One measurement: when it started, how long each phase took, what it summed to.

use arraybench_hal::elapsed_us;

use crate::config::EXPECTED_TOTAL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchRecord {
    /// Timer reading taken before the buffer was allocated.
    pub start_us: u64,
    pub alloc_us: u64,
    pub fill_sum_us: u64,
    pub total: i32,
}

impl BenchRecord {
    /// Builds a record from the three phase boundaries `t1 <= t2 <= t3`.
    pub const fn from_timestamps(t1: u64, t2: u64, t3: u64, total: i32) -> Self {
        Self {
            start_us: t1,
            alloc_us: elapsed_us(t1, t2),
            fill_sum_us: elapsed_us(t2, t3),
            total,
        }
    }

    /// Whether the sum survived intact.
    pub const fn checksum_ok(&self) -> bool {
        self.total == EXPECTED_TOTAL
    }
}
