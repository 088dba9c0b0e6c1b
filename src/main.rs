/*
 * main.rs
 *
 * Parse args, build config, run, map to an exit code. Boring on purpose.
 * The interesting stuff is in runner.rs.
 */

use std::process::exit;

use clap::Parser;
use clap::error::ErrorKind;

use timelimit::args::Args;
use timelimit::error::exit_codes;
use timelimit::runner::{RunConfig, run_command};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            /* --help and --version are not usage errors */
            let code = if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                0
            } else {
                i32::from(exit_codes::INTERNAL_ERROR)
            };
            let _ = e.print();
            exit(code);
        }
    };

    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("timelimit: {e}");
            exit(i32::from(exit_codes::INTERNAL_ERROR));
        }
    };

    match run_command(&args.command, &args.args, &config) {
        Ok(result) => exit(i32::from(result.exit_code(config.preserve_status))),
        Err(e) => {
            eprintln!("timelimit: {e}");
            exit(i32::from(e.exit_code()));
        }
    }
}
