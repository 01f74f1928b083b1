//! `heapdbg`: runs a binary with heap-corruption diagnostics enabled.
//!
//! ```text
//! heapdbg [--guard-malloc] <binary> [args...]
//! ```

mod cli;
mod launch;

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{CommandFactory as _, Parser as _};
use pixclip_engine::logging::init_logging;

use crate::cli::Cli;
use crate::launch::LaunchPlan;

/// Exit code for a missing binary or unusable arguments.
const EXIT_USAGE: u8 = 1;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures.
            return if err.use_stderr() { ExitCode::from(EXIT_USAGE) } else { ExitCode::SUCCESS };
        }
    };

    init_logging(cli.logging_config());

    let Some(plan) = LaunchPlan::new(cli.command, cli.guard_malloc) else {
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("error: no binary given");
        return ExitCode::from(EXIT_USAGE);
    };

    if cli.dry_run {
        return match io::stdout().write_all(plan.describe().as_bytes()) {
            Ok(()) => ExitCode::SUCCESS,
            // A reader that stopped early (`| head`) is not a failure.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("failed to write dry run: {err}");
                ExitCode::FAILURE
            }
        };
    }

    match launch::launch(&plan) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(launch::failure_exit_code(&err))
        }
    }
}
