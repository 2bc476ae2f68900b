//! Tests for the Isoscope tracing/observability system.

use std::sync::Mutex;

use isoscope_core::tracing::init_tracing;

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_isoscope_log_debug() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("ISOSCOPE_LOG", "debug");
    init_tracing();
    tracing::debug!("debug event after init");
    std::env::remove_var("ISOSCOPE_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("ISOSCOPE_LOG", "this_is=garbage=not=a=filter");
    init_tracing();
    std::env::remove_var("ISOSCOPE_LOG");
}

#[test]
fn test_init_from_parallel_threads() {
    use rayon::prelude::*;
    let _lock = TRACING_MUTEX.lock().unwrap();
    (0..8).into_par_iter().for_each(|_| init_tracing());
}
