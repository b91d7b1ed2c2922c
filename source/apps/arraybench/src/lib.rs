// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]

//! CONTEXT: Array fill/sum microbenchmark swept across core clock frequencies
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests per module + `tests/` (sweep output, host CLI)
//!
//! PUBLIC API:
//!   - `variants`: the benchmark table (array/vec x five walking styles)
//!   - `runner::Runner`: frequency sweep + benchmark sweep drivers
//!   - `report`: console line format and row parser
//!   - `config`: fixed parameters and `SweepConfig`
//!   - `run_host()`, `HostPlatform`, `Cli` (feature `std`)
//!
//! DEPENDS_ON: arraybench-hal (board contract), arraybench-log (diagnostics)
//!
//! The core is `no_std` + `alloc` and talks to the board only through
//! `arraybench_hal::Platform`. The `std` feature adds a host backend that
//! runs the same loop against `Instant`, `thread::sleep` and stdout.

extern crate alloc;

pub mod config;
pub mod record;
pub mod report;
pub mod runner;
pub mod variants;

#[cfg(feature = "std")]
mod cli;
#[cfg(feature = "std")]
mod std_host;

#[cfg(feature = "std")]
pub use cli::*;
#[cfg(feature = "std")]
pub use std_host::*;

pub use config::{FrequencyTarget, SweepConfig};
pub use record::BenchRecord;
pub use runner::{RunError, Runner, SweepSummary};
