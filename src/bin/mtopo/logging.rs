use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::io::stderr_is_tty;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise each `-v` raises the
/// level of the library and the binary from `warn` to `info` to `debug`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(stderr_is_tty())
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("mtase_topology={level},mtopo={level}")
}
