// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Console stream produced by full sweeps against the simulated board.

use arraybench::config::{FrequencyTarget, EXPECTED_TOTAL, TARGET_FREQUENCIES};
use arraybench::report::{self, parse_row, RowParseError, CSV_HEADER};
use arraybench::variants::VARIANTS;
use arraybench::{Runner, SweepConfig};
use arraybench_hal::fake::FakePlatform;

fn one_sweep() -> SweepConfig {
    SweepConfig { sweeps: Some(1), runs_per_test: 2, ..SweepConfig::default() }.without_delays()
}

#[test]
fn stream_starts_with_banner_and_header() {
    let mut platform = FakePlatform::new(1);
    let config = one_sweep();
    Runner::new(&mut platform, &config).unwrap().run().unwrap();

    let lines = platform.lines();
    assert_eq!(lines[0], report::BANNER);
    assert_eq!(lines[1], "# sweep 0");
    assert_eq!(lines[2], CSV_HEADER);
    assert_eq!(parse_row(&lines[2]), Err(RowParseError::NotARow));
}

#[test]
fn every_non_row_line_is_a_comment() {
    let mut platform = FakePlatform::new(1);
    let config = one_sweep();
    Runner::new(&mut platform, &config).unwrap().run().unwrap();

    for line in platform.lines() {
        assert!(
            parse_row(line).is_ok() || line.starts_with('#') || line == CSV_HEADER,
            "unexpected line {line:?}"
        );
    }
}

#[test]
fn rows_follow_frequency_then_variant_order() {
    let mut platform = FakePlatform::new(1);
    let config = one_sweep();
    Runner::new(&mut platform, &config).unwrap().run().unwrap();

    let rows: Vec<_> = platform.lines().iter().filter_map(|line| parse_row(line).ok()).collect();
    assert_eq!(rows.len(), TARGET_FREQUENCIES.len() * VARIANTS.len() * 2);

    let mut expected = Vec::new();
    for target in TARGET_FREQUENCIES {
        for variant in &VARIANTS {
            for run in 0..2 {
                expected.push((target, variant.name, run));
            }
        }
    }
    // The boot clock stays in effect for `default` until the first switch.
    for (row, (target, name, run)) in rows.iter().zip(expected) {
        let khz = match target {
            FrequencyTarget::Default => 125_000,
            FrequencyTarget::Khz(khz) => khz,
        };
        assert_eq!((row.freq_khz, row.name, row.run), (khz, name, run));
        assert_eq!(row.core, 0);
        assert_eq!(row.total, EXPECTED_TOTAL);
    }
}

#[test]
fn headers_name_store_style_and_size() {
    let mut platform = FakePlatform::new(1);
    let config = SweepConfig {
        frequencies: vec![FrequencyTarget::Khz(133_000)],
        variants: vec!["vec_get"],
        ..one_sweep()
    };
    Runner::new(&mut platform, &config).unwrap().run().unwrap();

    let header = platform
        .lines()
        .iter()
        .find(|line| line.starts_with("# Running benchmark"))
        .unwrap();
    assert!(header.contains("vec"));
    assert!(header.contains("get"));
    assert!(header.contains("vec_get"));
    assert!(header.ends_with("(core 0, 133000 kHz, size 32768 bytes)"));
}

#[test]
fn refused_frequency_leaves_a_skip_marker() {
    let mut platform = FakePlatform::new(1).with_max_khz(125_000);
    let config = SweepConfig { variants: vec!["array_iter"], ..one_sweep() };
    let summary = Runner::new(&mut platform, &config).unwrap().run_sweep().unwrap();

    assert_eq!(summary.skipped_frequencies, 2);
    let skips: Vec<_> =
        platform.lines().iter().filter(|line| line.starts_with("# skipping")).collect();
    assert_eq!(skips.len(), 2);
    assert!(skips[0].starts_with("# skipping frequency 133000 kHz"));
    assert!(skips[1].starts_with("# skipping frequency 200000 kHz"));
}

#[test]
fn sweep_counter_appears_per_pass() {
    let mut platform = FakePlatform::new(1);
    let config = SweepConfig {
        frequencies: vec![FrequencyTarget::Default],
        variants: vec!["array_index"],
        sweeps: Some(3),
        ..one_sweep()
    };
    Runner::new(&mut platform, &config).unwrap().run().unwrap();

    let sweeps: Vec<_> =
        platform.lines().iter().filter(|line| line.starts_with("# sweep")).cloned().collect();
    assert_eq!(sweeps, ["# sweep 0", "# sweep 1", "# sweep 2"]);
    let headers = platform.lines().iter().filter(|line| *line == CSV_HEADER).count();
    assert_eq!(headers, 3);
}

#[test]
fn default_keeps_the_clock_left_by_the_previous_sweep() {
    let mut platform = FakePlatform::new(1);
    let config = SweepConfig {
        frequencies: vec![FrequencyTarget::Default, FrequencyTarget::Khz(200_000)],
        variants: vec!["array_for"],
        sweeps: Some(2),
        ..one_sweep()
    };
    Runner::new(&mut platform, &config).unwrap().run().unwrap();

    // One request per sweep, both for the explicit frequency.
    assert_eq!(platform.clock_requests(), &[200_000, 200_000]);

    let lines = platform.lines();
    let second = lines.iter().position(|line| line == "# sweep 1").unwrap();
    let khz = |lines: &[String]| -> Vec<u32> {
        lines.iter().filter_map(|line| parse_row(line).ok()).map(|row| row.freq_khz).collect()
    };
    assert_eq!(khz(&lines[..second]), [125_000, 125_000, 200_000, 200_000]);
    assert_eq!(khz(&lines[second..]), [200_000, 200_000, 200_000, 200_000]);
}
