// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command line for host runs. Every knob defaults to the board constants.

use arraybench_log::Level;
use clap::Parser;

use crate::config::{
    FrequencyTarget, SweepConfig, CLOCK_SETTLE_MS, INTER_SWEEP_DELAY_MS, INTER_VARIANT_DELAY_MS,
    RUNS_PER_TEST, STARTUP_SETTLE_MS,
};
use crate::std_host::HostError;
use crate::variants;

#[derive(Debug, Parser)]
#[command(name = "arraybench")]
#[command(version, about = "Array fill/sum microbenchmark swept across core clock frequencies")]
pub struct Cli {
    /// Result rows per variant per frequency
    #[arg(long, default_value_t = RUNS_PER_TEST)]
    pub runs: u32,

    /// Full sweeps before exiting (runs forever when omitted)
    #[arg(long)]
    pub sweeps: Option<u32>,

    /// Frequency to visit, in kHz or `default`; repeat to build the sweep list
    #[arg(long = "freq", value_name = "KHZ", value_delimiter = ',')]
    pub frequencies: Vec<FrequencyTarget>,

    /// Variant to run; repeat to select several (all when omitted)
    #[arg(long = "variant", value_name = "NAME", value_delimiter = ',')]
    pub variants: Vec<String>,

    /// Wait after start-up before the first sweep
    #[arg(long, value_name = "MS", default_value_t = STARTUP_SETTLE_MS)]
    pub settle_ms: u32,

    /// Wait after each clock switch
    #[arg(long, value_name = "MS", default_value_t = CLOCK_SETTLE_MS)]
    pub clock_settle_ms: u32,

    /// Pause between variants
    #[arg(long, value_name = "MS", default_value_t = INTER_VARIANT_DELAY_MS)]
    pub variant_delay_ms: u32,

    /// Pause between sweeps
    #[arg(long, value_name = "MS", default_value_t = INTER_SWEEP_DELAY_MS)]
    pub sweep_delay_ms: u32,

    /// Diagnostics verbosity on stderr
    #[arg(long, value_name = "LEVEL", default_value_t = Level::Info)]
    pub log_level: Level,

    /// Print the variant table and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Builds and validates the sweep configuration.
    pub fn into_config(self) -> Result<SweepConfig, HostError> {
        let mut config = SweepConfig {
            runs_per_test: self.runs,
            startup_settle_ms: self.settle_ms,
            clock_settle_ms: self.clock_settle_ms,
            inter_variant_delay_ms: self.variant_delay_ms,
            inter_sweep_delay_ms: self.sweep_delay_ms,
            sweeps: self.sweeps,
            ..SweepConfig::default()
        };
        if !self.frequencies.is_empty() {
            config.frequencies = self.frequencies;
        }
        if !self.variants.is_empty() {
            config.variants = self
                .variants
                .iter()
                .map(|name| {
                    variants::find(name)
                        .map(|variant| variant.name)
                        .ok_or_else(|| HostError::UnknownVariant(name.clone()))
                })
                .collect::<Result<_, _>>()?;
        }
        config.validate()?;
        Ok(config)
    }
}
