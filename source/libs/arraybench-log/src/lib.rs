// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Diagnostics logging facade shared by the benchmark core and host tools
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests in this crate
//!
//! Raw line emission with runtime level gating and a per-target prefix:
//! `[LEVEL target] message`. Lines are assembled in a fixed stack buffer, so
//! the facade never allocates and is usable before any heap exists. The sink
//! is picked at compile time (`sink-std` writes to stderr, `sink-null` drops
//! everything). Benchmark result rows never go through here.

#![cfg_attr(not(any(test, feature = "sink-std")), no_std)]
#![forbid(unsafe_code)]

use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU8, Ordering};

/// Longest line (prefix included) a single log call can produce.
pub const MAX_LINE_LEN: usize = 192;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    fn from_raw(raw: u8) -> Level {
        match raw {
            1 => Level::Error,
            2 => Level::Warn,
            3 => Level::Info,
            4 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected level name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelParseError;

impl fmt::Display for LevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: error, warn, info, debug, trace")
    }
}

impl core::error::Error for LevelParseError {}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = if s.eq_ignore_ascii_case("error") {
            Level::Error
        } else if s.eq_ignore_ascii_case("warn") {
            Level::Warn
        } else if s.eq_ignore_ascii_case("info") {
            Level::Info
        } else if s.eq_ignore_ascii_case("debug") {
            Level::Debug
        } else if s.eq_ignore_ascii_case("trace") {
            Level::Trace
        } else {
            return Err(LevelParseError);
        };
        Ok(level)
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

pub fn set_max_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn max_level() -> Level {
    Level::from_raw(MAX_LEVEL.load(Ordering::Relaxed))
}

pub fn level_enabled(level: Level) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

pub fn error(target: &str, f: impl FnOnce(&mut LineBuilder<'_>)) {
    log(LineMeta { level: Level::Error, target }, f);
}

pub fn warn(target: &str, f: impl FnOnce(&mut LineBuilder<'_>)) {
    log(LineMeta { level: Level::Warn, target }, f);
}

pub fn info(target: &str, f: impl FnOnce(&mut LineBuilder<'_>)) {
    log(LineMeta { level: Level::Info, target }, f);
}

pub fn debug(target: &str, f: impl FnOnce(&mut LineBuilder<'_>)) {
    log(LineMeta { level: Level::Debug, target }, f);
}

pub fn trace(target: &str, f: impl FnOnce(&mut LineBuilder<'_>)) {
    log(LineMeta { level: Level::Trace, target }, f);
}

pub fn info_static(target: &str, message: &str) {
    info(target, |line| line.text(message));
}

pub fn warn_static(target: &str, message: &str) {
    warn(target, |line| line.text(message));
}

pub fn debug_static(target: &str, message: &str) {
    debug(target, |line| line.text(message));
}

pub fn log(meta: LineMeta<'_>, f: impl FnOnce(&mut LineBuilder<'_>)) {
    if !level_enabled(meta.level) {
        return;
    }
    let line = format_line(meta, f);
    sink::emit(meta.level, &line);
}

/// Builds the full `[LEVEL target] message` line without emitting it.
pub fn format_line(meta: LineMeta<'_>, f: impl FnOnce(&mut LineBuilder<'_>)) -> LineBuffer {
    let mut buf = LineBuffer::new();
    buf.push_byte(b'[');
    buf.push_str(meta.level.label());
    buf.push_byte(b' ');
    buf.push_str(meta.target);
    buf.push_byte(b']');
    buf.push_byte(b' ');
    {
        let mut builder = LineBuilder { buf: &mut buf };
        f(&mut builder);
    }
    buf
}

#[derive(Clone, Copy, Debug)]
pub struct LineMeta<'a> {
    pub level: Level,
    pub target: &'a str,
}

/// Fixed-capacity line storage. Text past [`MAX_LINE_LEN`] is dropped.
pub struct LineBuffer {
    bytes: [u8; MAX_LINE_LEN],
    len: usize,
    truncated: bool,
}

impl LineBuffer {
    const fn new() -> Self {
        Self { bytes: [0; MAX_LINE_LEN], len: 0, truncated: false }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // push_str only ever cuts on a char boundary.
        core::str::from_utf8(self.as_bytes()).unwrap_or("<invalid utf-8>")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn push_byte(&mut self, byte: u8) {
        if self.len < MAX_LINE_LEN {
            self.bytes[self.len] = byte;
            self.len += 1;
        } else {
            self.truncated = true;
        }
    }

    fn push_str(&mut self, s: &str) {
        let room = MAX_LINE_LEN - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        if take < s.len() {
            self.truncated = true;
        }
    }
}

impl fmt::Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

pub struct LineBuilder<'a> {
    buf: &'a mut LineBuffer,
}

impl LineBuilder<'_> {
    pub fn text(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn kv_literal(&mut self, key: &str, value: &str) {
        self.text(key);
        self.buf.push_byte(b'=');
        self.text(value);
    }

    pub fn kv_hex(&mut self, key: &str, value: u64) {
        self.text(key);
        self.buf.push_byte(b'=');
        self.hex(value);
    }

    pub fn kv_dec(&mut self, key: &str, value: u64) {
        self.text(key);
        self.buf.push_byte(b'=');
        self.dec(value);
    }

    pub fn hex(&mut self, value: u64) {
        self.buf.push_byte(b'0');
        self.buf.push_byte(b'x');
        emit_hex(value, |b| self.buf.push_byte(b));
    }

    pub fn dec(&mut self, value: u64) {
        let mut digits = [0u8; 20];
        let mut n = value;
        let mut idx = digits.len();
        if n == 0 {
            idx -= 1;
            digits[idx] = b'0';
        } else {
            while n != 0 {
                idx -= 1;
                digits[idx] = b'0' + (n % 10) as u8;
                n /= 10;
            }
        }
        for &b in &digits[idx..] {
            self.buf.push_byte(b);
        }
    }

    pub fn fmt(&mut self, args: fmt::Arguments<'_>) {
        fmt::write(&mut *self.buf, args).ok();
    }
}

fn emit_hex(value: u64, mut emit: impl FnMut(u8)) {
    for shift in (0..(core::mem::size_of::<u64>() * 2)).rev() {
        let nibble = ((value >> (shift * 4)) & 0xf) as u8;
        let ch = if nibble < 10 { b'0' + nibble } else { b'a' + (nibble - 10) };
        emit(ch);
    }
}

#[cfg(feature = "sink-std")]
mod sink_std {
    use std::io::Write;

    use super::{Level, LineBuffer};

    pub fn emit(_level: Level, line: &LineBuffer) {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        // Diagnostics are best-effort; a closed stderr must not stop a run.
        let _ = out.write_all(line.as_bytes());
        let _ = out.write_all(b"\n");
    }
}

#[cfg(all(not(feature = "sink-std"), feature = "sink-null"))]
mod sink_null {
    use super::{Level, LineBuffer};

    pub fn emit(_level: Level, _line: &LineBuffer) {}
}

#[cfg(feature = "sink-std")]
use sink_std as sink;

#[cfg(all(not(feature = "sink-std"), feature = "sink-null"))]
use sink_null as sink;

#[cfg(all(not(feature = "sink-std"), not(feature = "sink-null")))]
mod sink {
    compile_error!("arraybench-log requires enabling either `sink-std` or `sink-null`.");
}
