//! Tracing initialization
//!
//! Provides the standard subscriber setup shared by every Ark client binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to a log level for the calling crate
///
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing/logging for a client binary
///
/// Sets up logging to stderr (stdout carries command output) with:
/// - Formatted output without ANSI colors
/// - Environment-based filtering via RUST_LOG
/// - A default directive of `<crate_name>=<level>`, where level comes from
///   [`level_for_verbosity`]
///
/// Set `LOG_FORMAT=json` for structured JSON output.
///
/// # Example
///
/// ```rust,ignore
/// ark_common::init_tracing("ark_tools", cli.verbose)?;
/// ```
pub fn init_tracing(crate_name: &str, verbose: u8) -> anyhow::Result<()> {
    let level = level_for_verbosity(verbose);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}={}", crate_name, level).parse()?)
        .add_directive(format!("ark_common={}", level).parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // init_tracing itself can only run once per process, so only the
    // verbosity mapping is covered here.
    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(7), "trace");
    }
}
