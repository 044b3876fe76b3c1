use env_logger::{Builder, Env};

/// Installs the process logger. `RUST_LOG` wins over `default_level`.
pub fn init_logger(default_level: &str) {
    let env = Env::default().default_filter_or(default_level);
    if Builder::from_env(env).format_timestamp_millis().try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
