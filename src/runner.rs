/*
 * runner.rs
 *
 * The supervision sequence: spawn, wait, signal, maybe escalate.
 * Exit-code policy lives here too, and it is full of compatibility
 * quirks scripts rely on - read exit_code() carefully before touching.
 *
 * One quirk worth spelling out: on a timeout without escalation,
 * --preserve-status yields 0. The command is still terminating
 * asynchronously at that point, so its real exit status is unknowable
 * without blocking indefinitely; the reference tool family settles for 0
 * and so do we. Even when a kill-after wait does learn the real status,
 * the exit code stays 124/0 so the two paths agree.
 */

use std::thread;
use std::time::Duration;

use crate::args::Args;
use crate::duration::parse_duration;
use crate::error::{Result, exit_codes};
use crate::process::{self, ExitStatus, WaitOutcome};
use crate::signal::{DEFAULT_SIGNAL, resolve_signal};

/* settling pause after SIGKILL, lets the OS reclaim the process
 * before we report 137 */
const KILL_SETTLE: Duration = Duration::from_millis(100);

/* runtime config built from CLI args */
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub timeout: Duration,            /* how long before we send the signal */
    pub signal: i32,                  /* what to send (default: SIGTERM) */
    pub kill_after: Option<Duration>, /* if set and nonzero, SIGKILL after this grace period */
    pub preserve_status: bool,        /* exit 0 instead of 124 on timeout */
    pub verbose: bool,                /* print signal diagnostics to stderr */
}

impl RunConfig {
    /* build config from CLI args. fails only on bogus durations -
     * signal tokens never fail by contract. */
    pub fn from_args(args: &Args) -> Result<Self> {
        let timeout = parse_duration(&args.duration)?;
        let kill_after = args
            .kill_after
            .as_ref()
            .map(|s| parse_duration(s))
            .transpose()?;

        Ok(Self {
            timeout,
            signal: resolve_signal(&args.signal),
            kill_after,
            preserve_status: args.preserve_status,
            verbose: args.verbose,
        })
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::ZERO,
            signal: DEFAULT_SIGNAL,
            kill_after: None,
            preserve_status: false,
            verbose: false,
        }
    }
}

/// What happened to the supervised command.
#[derive(Debug)]
pub enum RunResult {
    /// Terminated within the primary deadline. No signal was sent.
    Completed(ExitStatus),
    /// The primary deadline expired and the configured signal was sent.
    /// `killed` is true when the grace period also expired and we
    /// escalated to SIGKILL; `status` is the post-signal exit status when
    /// a kill-after wait observed one.
    TimedOut {
        killed: bool,
        status: Option<ExitStatus>,
    },
}

impl RunResult {
    /// Final process exit status per the coreutils convention.
    #[must_use]
    pub fn exit_code(&self, preserve_status: bool) -> u8 {
        match self {
            /* common path: the command's own code, untouched */
            Self::Completed(status) => status_to_exit_code(status),
            /* escalation always reports 137, preserve-status or not */
            Self::TimedOut { killed: true, .. } => exit_codes::KILLED,
            Self::TimedOut { killed: false, .. } => {
                if preserve_status {
                    0
                } else {
                    exit_codes::TIMEOUT
                }
            }
        }
    }
}

/* exit status to 8-bit code, POSIX style: 128 + signum for signal death */
#[allow(clippy::cast_sign_loss)]
fn status_to_exit_code(status: &ExitStatus) -> u8 {
    if let Some(sig) = status.signal() {
        return ((128 + sig) & 0xFF) as u8;
    }

    (status.code().unwrap_or(1) & 0xFF) as u8
}

/// Spawn the command and enforce the deadline.
///
/// The configured signal is sent at most once and SIGKILL at most once
/// per invocation. Spawn failure is fatal; nothing is retried.
pub fn run_command(program: &str, args: &[String], config: &RunConfig) -> Result<RunResult> {
    let mut child = process::spawn(program, args)?;

    if let WaitOutcome::Completed(status) = child.wait_deadline(config.timeout)? {
        return Ok(RunResult::Completed(status));
    }

    /* deadline passed - send the configured signal */
    if config.verbose {
        eprintln!(
            "timelimit: sending signal {} to process {}",
            config.signal,
            child.id()
        );
    }
    child.deliver(config.signal);

    /* zero kill-after means escalation is disabled */
    let grace = match config.kill_after {
        Some(grace) if !grace.is_zero() => grace,
        _ => {
            return Ok(RunResult::TimedOut {
                killed: false,
                status: None,
            });
        }
    };

    if let WaitOutcome::Completed(status) = child.wait_deadline(grace)? {
        return Ok(RunResult::TimedOut {
            killed: false,
            status: Some(status),
        });
    }

    /* survived the grace period - escalate */
    if config.verbose {
        eprintln!("timelimit: sending SIGKILL to process {}", child.id());
    }
    child.force_kill();
    thread::sleep(KILL_SETTLE);

    Ok(RunResult::TimedOut {
        killed: true,
        status: None,
    })
}
