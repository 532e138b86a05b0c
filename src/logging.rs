use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr subscriber. `RUST_LOG` filters (default `info`),
/// `DAPPKIT_LOG_JSON=1` switches to JSON lines. A second call is a no-op.
pub fn init_logging() {
    let _ = try_init_logging();
}

/// Like [`init_logging`], returning whether this call installed the global
/// subscriber. `false` means one was already set.
pub fn try_init_logging() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr);

    if json_requested() {
        builder.json().try_init().is_ok()
    } else {
        builder.with_target(false).try_init().is_ok()
    }
}

fn json_requested() -> bool {
    std::env::var("DAPPKIT_LOG_JSON").map(|value| value == "1").unwrap_or(false)
}
