use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `directive` is an `EnvFilter` string such as `info` or
/// `cashcard=debug,tower_http=info`; an unparsable directive falls back to
/// `info`. Calling this again after a subscriber is installed does nothing.
pub fn init(directive: &str) {
    let env_filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}
