// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark variants.
//!
//! Every variant takes three timer readings: before allocation, after
//! allocation, and after filling [`ARRAY_LEN`] elements with [`THE_NUMBER`]
//! and summing them. They differ only in where the buffer lives (stack array
//! or `Vec`) and how it is walked. The buffer is handed to
//! [`core::hint::black_box`] right after allocation, so neither the fill nor
//! the sum can be folded away or moved across the timer reads.

use alloc::vec;
use core::fmt;
use core::hint::black_box;

use arraybench_hal::MonotonicTimer;

use crate::config::{ARRAY_LEN, BUFFER_BYTES, THE_NUMBER};
use crate::record::BenchRecord;

/// Where the buffer lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataStore {
    /// `[i32; ARRAY_LEN]` on the stack.
    Array,
    /// `Vec<i32>` on the heap.
    Vec,
}

impl DataStore {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Vec => "vec",
        }
    }
}

impl fmt::Display for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// How the buffer is walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterStyle {
    /// `buf[i]` over `0..ARRAY_LEN`.
    Index,
    /// Explicit iterator advanced with `next()`.
    Iter,
    /// `for elem in &mut buf`.
    ForEach,
    /// Checked `get_mut(i)` / `get(i)`.
    Get,
    /// `fill()` and `iter().sum()`.
    Adapter,
}

impl IterStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Iter => "iter",
            Self::ForEach => "for",
            Self::Get => "get",
            Self::Adapter => "adapter",
        }
    }
}

impl fmt::Display for IterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One entry of the benchmark table.
#[derive(Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub data_store: DataStore,
    pub iter_style: IterStyle,
    func: fn(&dyn MonotonicTimer) -> BenchRecord,
}

impl Variant {
    /// Runs one allocate/fill/sum cycle.
    pub fn run(&self, timer: &dyn MonotonicTimer) -> BenchRecord {
        (self.func)(timer)
    }

    /// Bytes held by the buffer this variant allocates.
    pub const fn buffer_bytes(&self) -> usize {
        BUFFER_BYTES
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("data_store", &self.data_store)
            .field("iter_style", &self.iter_style)
            .finish()
    }
}

pub(crate) const fn variant(
    name: &'static str,
    data_store: DataStore,
    iter_style: IterStyle,
    func: fn(&dyn MonotonicTimer) -> BenchRecord,
) -> Variant {
    Variant { name, data_store, iter_style, func }
}

/// Every variant, in run order.
pub static VARIANTS: [Variant; 10] = [
    variant("array_index", DataStore::Array, IterStyle::Index, bm_array_index),
    variant("array_iter", DataStore::Array, IterStyle::Iter, bm_array_iter),
    variant("array_for", DataStore::Array, IterStyle::ForEach, bm_array_for),
    variant("array_get", DataStore::Array, IterStyle::Get, bm_array_get),
    variant("array_adapter", DataStore::Array, IterStyle::Adapter, bm_array_adapter),
    variant("vec_index", DataStore::Vec, IterStyle::Index, bm_vec_index),
    variant("vec_iter", DataStore::Vec, IterStyle::Iter, bm_vec_iter),
    variant("vec_for", DataStore::Vec, IterStyle::ForEach, bm_vec_for),
    variant("vec_get", DataStore::Vec, IterStyle::Get, bm_vec_get),
    variant("vec_adapter", DataStore::Vec, IterStyle::Adapter, bm_vec_adapter),
];

/// Looks a variant up by name.
pub fn find(name: &str) -> Option<&'static Variant> {
    VARIANTS.iter().find(|variant| variant.name == name)
}

// Stack array

#[allow(clippy::needless_range_loop)]
fn bm_array_index(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = [0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    for i in 0..ARRAY_LEN {
        buf[i] = THE_NUMBER;
    }
    let mut total: i32 = 0;
    for i in 0..ARRAY_LEN {
        total += buf[i];
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

#[allow(clippy::while_let_on_iterator)]
fn bm_array_iter(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = [0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    let mut it = buf.iter_mut();
    while let Some(elem) = it.next() {
        *elem = THE_NUMBER;
    }
    let mut total: i32 = 0;
    let mut it = buf.iter();
    while let Some(elem) = it.next() {
        total += *elem;
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

fn bm_array_for(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = [0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    for elem in &mut buf {
        *elem = THE_NUMBER;
    }
    let mut total: i32 = 0;
    for elem in &buf {
        total += *elem;
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

fn bm_array_get(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = [0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    for i in 0..ARRAY_LEN {
        if let Some(slot) = buf.get_mut(i) {
            *slot = THE_NUMBER;
        }
    }
    let mut total: i32 = 0;
    for i in 0..ARRAY_LEN {
        total += buf.get(i).copied().unwrap_or(0);
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

fn bm_array_adapter(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = [0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    buf.fill(THE_NUMBER);
    let total: i32 = buf.iter().sum();
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

// Vec

#[allow(clippy::needless_range_loop)]
fn bm_vec_index(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = vec![0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    for i in 0..ARRAY_LEN {
        buf[i] = THE_NUMBER;
    }
    let mut total: i32 = 0;
    for i in 0..ARRAY_LEN {
        total += buf[i];
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

#[allow(clippy::while_let_on_iterator)]
fn bm_vec_iter(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = vec![0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    let mut it = buf.iter_mut();
    while let Some(elem) = it.next() {
        *elem = THE_NUMBER;
    }
    let mut total: i32 = 0;
    let mut it = buf.iter();
    while let Some(elem) = it.next() {
        total += *elem;
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

fn bm_vec_for(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = vec![0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    for elem in &mut buf {
        *elem = THE_NUMBER;
    }
    let mut total: i32 = 0;
    for elem in &buf {
        total += *elem;
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

fn bm_vec_get(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = vec![0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    for i in 0..ARRAY_LEN {
        if let Some(slot) = buf.get_mut(i) {
            *slot = THE_NUMBER;
        }
    }
    let mut total: i32 = 0;
    for i in 0..ARRAY_LEN {
        total += buf.get(i).copied().unwrap_or(0);
    }
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

fn bm_vec_adapter(timer: &dyn MonotonicTimer) -> BenchRecord {
    let t1 = timer.now_us();
    let mut buf = vec![0i32; ARRAY_LEN];
    black_box(&mut buf);
    let t2 = timer.now_us();
    buf.fill(THE_NUMBER);
    let total: i32 = buf.iter().sum();
    let t3 = timer.now_us();
    BenchRecord::from_timestamps(t1, t2, t3, black_box(total))
}

#[cfg(test)]
mod tests {
    use arraybench_hal::fake::FakePlatform;

    use super::*;
    use crate::config::EXPECTED_TOTAL;

    #[test]
    fn every_variant_sums_to_expected_total() {
        let timer = FakePlatform::new(1);
        for variant in &VARIANTS {
            let record = variant.run(&timer);
            assert_eq!(record.total, EXPECTED_TOTAL, "{}", variant.name);
            assert!(record.checksum_ok());
        }
    }

    #[test]
    fn phases_are_bounded_by_three_timer_reads() {
        // Each timer read advances the fake clock by exactly one tick.
        let timer = FakePlatform::new(5);
        for variant in &VARIANTS {
            let before = timer.peek_us();
            let record = variant.run(&timer);
            assert_eq!(record.start_us, before + 5, "{}", variant.name);
            assert_eq!(record.alloc_us, 5);
            assert_eq!(record.fill_sum_us, 5);
            assert_eq!(timer.peek_us(), before + 15);
        }
    }

    #[test]
    fn names_are_unique_and_labels_match_names() {
        for (i, a) in VARIANTS.iter().enumerate() {
            for b in &VARIANTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
            assert!(a.name.starts_with(a.data_store.label()));
        }
    }

    #[test]
    fn find_by_name() {
        let variant = find("vec_get").expect("present");
        assert_eq!(variant.data_store, DataStore::Vec);
        assert_eq!(variant.iter_style, IterStyle::Get);
        assert!(find("deque_for").is_none());
    }

    #[test]
    fn both_stores_cover_every_style() {
        for style in [
            IterStyle::Index,
            IterStyle::Iter,
            IterStyle::ForEach,
            IterStyle::Get,
            IterStyle::Adapter,
        ] {
            for store in [DataStore::Array, DataStore::Vec] {
                assert!(VARIANTS
                    .iter()
                    .any(|v| v.data_store == store && v.iter_style == style));
            }
        }
    }
}
