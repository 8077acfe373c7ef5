//! Capability probe contract
//!
//! The probes answer fixed build questions; every call in a process agrees.

use std::mem::size_of;

use largevis_env_core::application::CapabilityProbe;
use largevis_env_core::domain::{BuildConfiguration, IndexWidth, VertexIdx};
use largevis_env_core::port::WorkerScheduler;
use largevis_env_rayon::{check_bits, check_openmp, Scheduler};

#[test]
fn test_check_bits_is_deterministic() {
    let first = check_bits();
    for _ in 0..1_000 {
        assert_eq!(check_bits(), first);
    }
}

#[test]
fn test_check_openmp_is_deterministic() {
    let first = check_openmp();
    for _ in 0..1_000 {
        assert_eq!(check_openmp(), first);
    }
}

#[test]
fn test_check_bits_reflects_vertex_index_size() {
    assert_eq!(check_bits(), size_of::<VertexIdx>() == 8);
    assert_eq!(check_bits(), IndexWidth::BUILD == IndexWidth::Wide);
}

#[test]
fn test_probes_agree_with_build_configuration() {
    let flags = BuildConfiguration::CURRENT.flags();
    assert_eq!(check_bits(), flags.wide_index);
    assert_eq!(check_openmp(), flags.parallel);
    assert_eq!(CapabilityProbe::new().flags(), flags);
}

#[test]
fn test_openmp_answer_matches_scheduler() {
    // This crate enables the adapter's default `parallel` feature
    assert!(check_openmp());
    assert!(Scheduler::for_build().is_parallel());
}

#[test]
fn test_probes_agree_across_threads() {
    let expected = (check_bits(), check_openmp());

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| (check_bits(), check_openmp())))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_capability_report_serializes() {
    let json = serde_json::to_value(CapabilityProbe::new().build()).unwrap();
    assert_eq!(json["parallel"], check_openmp());
    let width = if check_bits() { "wide" } else { "narrow" };
    assert_eq!(json["index_width"], width);
}
