//! CONTEXT: Tests for platform traits against the in-memory fake board
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Stable
//! TEST_COVERAGE: 5 integration tests
//!
//! TEST_SCOPE:
//!   - Timer monotonicity and delay accounting
//!   - Clock switch acceptance and refusal
//!   - Sink closure
//!
//! DEPENDENCIES:
//!   - arraybench_hal::fake::FakePlatform: simulated board (feature `fake`)

#![cfg(feature = "fake")]

use arraybench_hal::fake::{FakePlatform, DEFAULT_BOOT_KHZ};
use arraybench_hal::{elapsed_us, ClockControl, ClockError, Delay, LineSink, MonotonicTimer, SinkError};

#[test]
fn timer_advances_per_read() {
    let platform = FakePlatform::new(3);
    let a = platform.now_us();
    let b = platform.now_us();
    assert_eq!(elapsed_us(a, b), 3);
}

#[test]
fn delay_moves_clock_in_microseconds() {
    let mut platform = FakePlatform::new(0);
    platform.delay_ms(5);
    assert_eq!(platform.peek_us(), 5_000);
    assert_eq!(platform.delays(), &[5]);
}

#[test]
fn clock_switch_respects_max() {
    let mut platform = FakePlatform::new(1).with_max_khz(133_000);
    assert_eq!(platform.sys_clock_khz(), DEFAULT_BOOT_KHZ);
    platform.set_sys_clock_khz(25_000).expect("within range");
    assert_eq!(platform.sys_clock_khz(), 25_000);

    let err = platform.set_sys_clock_khz(200_000).unwrap_err();
    assert_eq!(err, ClockError::Unachievable { khz: 200_000 });
    assert_eq!(platform.sys_clock_khz(), 25_000);
    assert_eq!(platform.clock_requests(), &[25_000, 200_000]);
}

#[test]
fn sink_records_lines() {
    let mut platform = FakePlatform::default();
    platform.write_line("a").unwrap();
    platform.write_line("b").unwrap();
    assert_eq!(platform.lines(), &["a".to_string(), "b".to_string()]);
}

#[test]
fn sink_closes_after_limit() {
    let mut platform = FakePlatform::default().with_close_after(1);
    platform.write_line("first").unwrap();
    assert_eq!(platform.write_line("second"), Err(SinkError::Closed));
    assert_eq!(platform.lines().len(), 1);
}
