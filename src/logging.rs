//! Logging setup on top of the `log` facade and `env_logger` backend.
//!
//! The level comes from, in priority order: the `RUST_LOG` environment
//! variable if set, then the CLI flags (`--quiet` for errors only,
//! `-v`/`-vv` for debug/trace), defaulting to info.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initializes the logger. Call once, before any log statements.
pub fn init(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(|buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);
        writeln!(
            buf,
            "{level_style}{:<5}{level_style:#} {}",
            level,
            record.args()
        )
    });

    builder.init();
}

/// Maps CLI verbosity flags to a level filter.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
