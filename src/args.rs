/*
 * args.rs
 *
 * Clap derive macros handle parsing. Life's too short to do this by hand.
 *
 * trailing_var_arg grabs everything after COMMAND so `timelimit 5 grep -r`
 * doesn't try to parse grep's flags.
 */

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "timelimit",
    version,
    about = "Run a command with a time limit",
    long_about = "Start COMMAND, and kill it if still running after DURATION.\n\n\
                  DURATION is a floating-point number with optional suffix:\n\
                  's' for seconds (default), 'm' for minutes, 'h' for hours, 'd' for days.\n\n\
                  Examples:\n\
                    timelimit 30 cmd       # 30 seconds\n\
                    timelimit 1.5m cmd     # 1.5 minutes (90 seconds)\n\
                    timelimit 2h cmd       # 2 hours\n\n\
                  If the command times out, and --preserve-status is not set, exit with\n\
                  status 124. If no signal is specified, SIGTERM is sent; use --kill-after\n\
                  to escalate to SIGKILL after an additional delay.",
    after_help = "Exit status:\n\
                  124 if COMMAND times out, and --preserve-status is not specified\n\
                  125 if the timelimit command itself fails\n\
                  126 if COMMAND is found but cannot be invoked\n\
                  127 if COMMAND cannot be found\n\
                  137 if COMMAND survives the --kill-after grace period (128+9)\n\
                  the exit status of COMMAND otherwise"
)]
pub struct Args {
    /// Specify the signal to be sent on timeout.
    ///
    /// SIGNAL may be a name like 'TERM', 'HUP', or 'KILL' (with or without
    /// a SIG prefix), or a number. Unrecognized names fall back to TERM.
    #[arg(
        short = 's',
        long = "signal",
        default_value = "TERM",
        value_name = "SIGNAL"
    )]
    pub signal: String,

    /// Send a KILL signal if COMMAND is still running after DURATION.
    ///
    /// This ensures the process is killed after the specified additional
    /// time, even if it ignores the initial signal. A duration of 0
    /// disables the escalation.
    #[arg(short = 'k', long = "kill-after", value_name = "DURATION")]
    pub kill_after: Option<String>,

    /// Exit with status 0 instead of 124 when the command times out.
    #[arg(short = 'p', long = "preserve-status")]
    pub preserve_status: bool,

    /// Diagnose to stderr any signal sent upon timeout.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Duration before sending the signal.
    ///
    /// A floating-point number with optional suffix:
    /// 's' for seconds (default), 'm' for minutes, 'h' for hours,
    /// 'd' for days. A duration of 0 expires immediately.
    #[arg(value_name = "DURATION")]
    pub duration: String,

    /// Command to run.
    #[arg(value_name = "COMMAND", allow_hyphen_values = true)]
    pub command: String,

    /// Arguments for the command.
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARG"
    )]
    pub args: Vec<String>,
}
