
/// Routes `tracing` output to the test harness. Set `RUST_LOG=roster=trace` to see every
/// rotation.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
