//! Logging for the `laravelboot` binary.
//!
//! Steps in `laravelboot-core` and the feature catalog in
//! `laravelboot-adapters` emit spans and events; this is the only place a
//! subscriber gets installed. Everything goes to stderr, so stdout stays
//! parseable for `list --format json`.
//!
//! Each `-v` raises the level one notch from WARN up to TRACE. `--quiet`
//! drops it to ERROR whatever the `-v` count. A set `RUST_LOG` replaces the
//! filter entirely, including for third-party crates such as `reqwest`.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown without `RUST_LOG`.
const LOG_TARGETS: [&str; 3] = ["laravelboot", "laravelboot_core", "laravelboot_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));
    let ansi = !args.no_color && std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("installing the tracing subscriber")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// One `target=level` directive per workspace crate, comma separated.
fn directives(level: LevelFilter) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
