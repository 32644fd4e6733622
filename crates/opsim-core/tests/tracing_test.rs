//! Tests for tracing initialization.

use std::sync::Mutex;

use opsim_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_opsim_log_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("OPSIM_LOG", "opsim_analysis=debug,opsim_core=warn");
    init_tracing();
    tracing::info!("tracing initialized");
    std::env::remove_var("OPSIM_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}
