use std::ffi::OsString;

use pixclip_engine::logging::LoggingConfig;

/// Run a binary with the system allocator's heap-corruption diagnostics on.
///
/// The launcher replaces itself with the target, so the target's crash
/// output and exit status are reported unchanged.
#[derive(clap::Parser, Debug)]
#[command(name = "heapdbg", version)]
pub struct Cli {
    /// Also inject the guard-page allocator. Very slow; faults on the first
    /// out-of-bounds access.
    #[arg(short = 'g', long)]
    pub guard_malloc: bool,

    /// Print the environment and command line, then exit without running.
    #[arg(long)]
    pub dry_run: bool,

    /// Log each setting to stderr before launching.
    #[arg(short, long)]
    pub verbose: bool,

    /// Binary to run, followed by its arguments.
    #[arg(value_name = "BINARY", trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub command: Vec<OsString>,
}

impl Cli {
    /// Warnings only unless `--verbose`, so the target's own stderr stays
    /// readable. `RUST_LOG` still applies without `--verbose`.
    pub fn logging_config(&self) -> LoggingConfig {
        if self.verbose {
            LoggingConfig::with_filter("debug")
        } else {
            LoggingConfig {
                default_level: log::LevelFilter::Warn,
                ..LoggingConfig::default()
            }
        }
    }
}
