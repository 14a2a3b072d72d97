use env_logger::Env;

/// Initialise logging for binaries. `RUST_LOG` overrides the `warn` default.
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
