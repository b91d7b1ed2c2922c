// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Console line format.
//!
//! Data rows are plain comma-separated values under [`CSV_HEADER`]. Every
//! other line starts with [`COMMENT_PREFIX`] so offline tooling can drop it
//! with a single prefix test.

use alloc::format;
use alloc::string::String;
use core::fmt;

use arraybench_hal::{ClockError, CLOCK_UNKNOWN_KHZ};

use crate::config::EXPECTED_TOTAL;
use crate::record::BenchRecord;
use crate::variants::Variant;

pub const BANNER: &str = "# A look at the performance of different array types in Rust";

pub const COMMENT_PREFIX: &str = "#";

/// Precedes rows whose `freq_khz` is 0 because the platform cannot read its clock.
pub const CLOCK_UNKNOWN: &str = "# clock unknown: freq_khz 0 marks rows without a known core clock";

pub const CSV_HEADER: &str =
    "timestamp_us,core,freq_khz,data_store,iter_style,name,run,alloc_us,fill_sum_us,total";

const FIELD_COUNT: usize = 10;

pub fn sweep_line(sweep: u32) -> String {
    format!("# sweep {sweep}")
}

/// Announces a variant before its runs.
pub fn variant_header(variant: &Variant, core: u32, freq_khz: u32) -> String {
    format!(
        "# Running benchmark {:>10} : {:>10} : {:>30} (core {}, {}, size {} bytes)",
        variant.data_store,
        variant.iter_style,
        variant.name,
        core,
        ClockLabel(freq_khz),
        variant.buffer_bytes()
    )
}

struct ClockLabel(u32);

impl fmt::Display for ClockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CLOCK_UNKNOWN_KHZ => f.write_str("clock unknown"),
            khz => write!(f, "{khz} kHz"),
        }
    }
}

pub fn result_row(
    variant: &Variant,
    core: u32,
    freq_khz: u32,
    run: u32,
    record: &BenchRecord,
) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{}",
        record.start_us,
        core,
        freq_khz,
        variant.data_store,
        variant.iter_style,
        variant.name,
        run,
        record.alloc_us,
        record.fill_sum_us,
        record.total
    )
}

pub fn mismatch_line(variant: &Variant, run: u32, record: &BenchRecord) -> String {
    format!(
        "# checksum mismatch name={} run={} expected={} got={}",
        variant.name, run, EXPECTED_TOTAL, record.total
    )
}

pub fn skip_line(khz: u32, err: ClockError) -> String {
    format!("# skipping frequency {khz} kHz: {err}")
}

/// A data row read back from the console log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultRow<'a> {
    pub timestamp_us: u64,
    pub core: u32,
    pub freq_khz: u32,
    pub data_store: &'a str,
    pub iter_style: &'a str,
    pub name: &'a str,
    pub run: u32,
    pub alloc_us: u64,
    pub fill_sum_us: u64,
    pub total: i32,
}

impl ResultRow<'_> {
    pub fn record(&self) -> BenchRecord {
        BenchRecord {
            start_us: self.timestamp_us,
            alloc_us: self.alloc_us,
            fill_sum_us: self.fill_sum_us,
            total: self.total,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowParseError {
    /// The line is a comment, banner or header.
    NotARow,
    /// Wrong number of comma-separated fields.
    FieldCount(usize),
    /// A numeric column did not parse.
    InvalidField(&'static str),
}

impl fmt::Display for RowParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotARow => f.write_str("not a data row"),
            Self::FieldCount(n) => write!(f, "expected {FIELD_COUNT} fields, found {n}"),
            Self::InvalidField(name) => write!(f, "invalid value in column {name}"),
        }
    }
}

impl core::error::Error for RowParseError {}

/// Parses one data row.
pub fn parse_row(line: &str) -> Result<ResultRow<'_>, RowParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.starts_with(COMMENT_PREFIX) || line == CSV_HEADER || line.is_empty() {
        return Err(RowParseError::NotARow);
    }
    let count = line.split(',').count();
    if count != FIELD_COUNT {
        return Err(RowParseError::FieldCount(count));
    }
    let mut fields = line.split(',');
    let mut next = || fields.next().unwrap_or_default();
    Ok(ResultRow {
        timestamp_us: number(next(), "timestamp_us")?,
        core: number(next(), "core")?,
        freq_khz: number(next(), "freq_khz")?,
        data_store: next(),
        iter_style: next(),
        name: next(),
        run: number(next(), "run")?,
        alloc_us: number(next(), "alloc_us")?,
        fill_sum_us: number(next(), "fill_sum_us")?,
        total: number(next(), "total")?,
    })
}

fn number<T: core::str::FromStr>(field: &str, column: &'static str) -> Result<T, RowParseError> {
    field.parse().map_err(|_| RowParseError::InvalidField(column))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::variants::{find, VARIANTS};

    #[test]
    fn header_lists_every_row_column() {
        assert_eq!(CSV_HEADER.split(',').count(), FIELD_COUNT);
    }

    #[test]
    fn row_layout() {
        let variant = find("array_for").expect("variant");
        let record = BenchRecord::from_timestamps(5_000_000, 5_000_002, 5_000_830, EXPECTED_TOTAL);
        let row = result_row(variant, 0, 125_000, 3, &record);
        assert_eq!(row, "5000000,0,125000,array,for,array_for,3,2,828,1007616");
    }

    #[test]
    fn variant_header_is_padded_and_commented() {
        let variant = find("vec_adapter").expect("variant");
        let line = variant_header(variant, 0, 133_000);
        assert!(line.starts_with("# Running benchmark        vec :    adapter : "));
        assert!(line.ends_with("vec_adapter (core 0, 133000 kHz, size 32768 bytes)"));
    }

    #[test]
    fn unknown_clock_is_spelled_out() {
        let variant = find("array_get").expect("variant");
        let line = variant_header(variant, 0, CLOCK_UNKNOWN_KHZ);
        assert!(line.ends_with("array_get (core 0, clock unknown, size 32768 bytes)"));
        assert!(!line.contains("0 kHz"));
        assert_eq!(parse_row(CLOCK_UNKNOWN), Err(RowParseError::NotARow));
    }

    #[test]
    fn mismatch_and_skip_lines_are_comments() {
        let variant = &VARIANTS[0];
        let record = BenchRecord::from_timestamps(0, 1, 2, 7);
        let mismatch = mismatch_line(variant, 4, &record);
        assert_eq!(
            mismatch,
            "# checksum mismatch name=array_index run=4 expected=1007616 got=7"
        );
        let skip = skip_line(250_000, ClockError::Unachievable { khz: 250_000 });
        assert!(skip.starts_with("# skipping frequency 250000 kHz: "));
        assert_eq!(parse_row(&mismatch), Err(RowParseError::NotARow));
        assert_eq!(parse_row(&skip), Err(RowParseError::NotARow));
    }

    #[test]
    fn parse_rejects_non_rows() {
        assert_eq!(parse_row(BANNER), Err(RowParseError::NotARow));
        assert_eq!(parse_row(CSV_HEADER), Err(RowParseError::NotARow));
        assert_eq!(parse_row("1,2,3"), Err(RowParseError::FieldCount(3)));
        assert_eq!(
            parse_row("x,0,125000,array,for,array_for,0,1,2,3"),
            Err(RowParseError::InvalidField("timestamp_us"))
        );
    }

    #[test]
    fn parse_tolerates_crlf() {
        let row = parse_row("9,0,25000,vec,get,vec_get,1,3,4,1007616\r\n").expect("row");
        assert_eq!(row.name, "vec_get");
        assert_eq!(row.total, EXPECTED_TOTAL);
    }

    proptest! {
        #[test]
        fn emitted_rows_parse_back(
            index in 0usize..VARIANTS.len(),
            start in any::<u32>(),
            alloc in 0u64..10_000,
            fill in 0u64..1_000_000,
            khz in 1u32..300_000,
            run in 0u32..100,
            total in any::<i32>(),
        ) {
            let variant = &VARIANTS[index];
            let t1 = u64::from(start);
            let record = BenchRecord::from_timestamps(t1, t1 + alloc, t1 + alloc + fill, total);
            let line = result_row(variant, 0, khz, run, &record);
            let row = parse_row(&line).expect("row parses");
            prop_assert_eq!(row.record(), record);
            prop_assert_eq!(row.name, variant.name);
            prop_assert_eq!(row.data_store, variant.data_store.label());
            prop_assert_eq!(row.iter_style, variant.iter_style.label());
            prop_assert_eq!(row.freq_khz, khz);
            prop_assert_eq!(row.run, run);
        }
    }
}
