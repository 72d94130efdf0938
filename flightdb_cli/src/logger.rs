use env_logger::{Builder, Env};

/// Initialize the logger. The level comes from `RUST_LOG` and defaults to "info".
pub fn initialize_logger() {
    let env = Env::default().default_filter_or("info");

    Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
