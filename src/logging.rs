use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber for the host application.
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_directive`
/// (e.g. `"market_signal_core=debug,info"`).  A second call returns an error
/// instead of panicking.
pub fn init(default_directive: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        // Another test may already have installed a subscriber; either way
        // the call after this one must fail cleanly.
        let _ = init("debug");
        assert!(init("info").is_err());
    }
}
