//! CONTEXT: Host-side helpers for the criterion variant benches
//! INTENT: Name-based variant runs for checks outside the timed loop
//! IDL (target): run_named(name)
//! DEPS: arraybench (variant table, host timer)
//! READINESS: Library; no board required
//! TESTS: Lookup by name; checksum on every sample
use arraybench::variants;
use arraybench::{BenchRecord, HostTimer};

/// Runs the variant called `name` once against the host timer.
pub fn run_named(name: &str) -> Option<BenchRecord> {
    let variant = variants::find(name)?;
    Some(variant.run(&HostTimer::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arraybench::variants::VARIANTS;

    #[test]
    fn every_variant_runs_by_name() {
        for variant in &VARIANTS {
            let record = run_named(variant.name).unwrap();
            assert!(record.checksum_ok(), "{} summed to {}", variant.name, record.total);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(run_named("list_for").is_none());
    }
}
