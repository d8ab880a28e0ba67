//! Logging setup for hosts that have not installed a subscriber.

use tracing_subscriber::EnvFilter;

/// Filter directive for the requested verbosity.
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "modweave=debug"
    } else {
        "modweave=info"
    }
}

/// Install a compact fmt subscriber.
///
/// Returns false if the host already installed a global subscriber, in
/// which case that one keeps receiving our events.
pub fn init(verbose: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive(verbose)))
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(true), "modweave=debug");
        assert_eq!(filter_directive(false), "modweave=info");
    }

    #[test]
    fn test_second_init_is_harmless() {
        init(false);
        assert!(!init(true));
    }
}
