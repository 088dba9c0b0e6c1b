/*
 * error.rs
 *
 * Exit codes match GNU coreutils. Scripts depend on these.
 * 124 = timed out, 125 = our fault, 126 = not executable, 127 = not found,
 * 137 = we had to escalate to SIGKILL (128 + 9).
 *
 * Don't change them. You'll break CI pipelines.
 */

use std::fmt;

/// exit codes per GNU coreutils convention. don't change these.
pub mod exit_codes {
    /// Command ran too long (timed out)
    pub const TIMEOUT: u8 = 124;
    /// timelimit itself failed (bad arguments, spawn error)
    pub const INTERNAL_ERROR: u8 = 125;
    /// Command found but couldn't be executed (permissions)
    pub const CANNOT_INVOKE: u8 = 126;
    /// Command not found
    pub const NOT_FOUND: u8 = 127;
    /// Command survived the grace period and was force-killed (128 + 9)
    pub const KILLED: u8 = 137;
}

/* everything that can go wrong */
#[derive(Debug)]
pub enum TimeoutError {
    InvalidDuration(String),
    NegativeDuration,
    DurationOverflow,
    CommandNotFound(String),
    PermissionDenied(String),
    SpawnError(i32), /* errno from posix_spawnp */
    WaitError(i32),  /* errno from waitpid */
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration(s) => write!(f, "invalid duration: {s}"),
            Self::NegativeDuration => write!(f, "invalid duration: negative values not allowed"),
            Self::DurationOverflow => write!(f, "invalid duration: value too large"),
            Self::CommandNotFound(s) => write!(f, "command not found: {s}"),
            Self::PermissionDenied(s) => write!(f, "permission denied: {s}"),
            Self::SpawnError(errno) => write!(f, "failed to spawn process: errno {errno}"),
            Self::WaitError(errno) => write!(f, "wait error: errno {errno}"),
        }
    }
}

impl TimeoutError {
    /* map errors to exit codes. 126 vs 127 matters to scripts. */
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CommandNotFound(_) => exit_codes::NOT_FOUND,
            Self::PermissionDenied(_) => exit_codes::CANNOT_INVOKE,
            Self::InvalidDuration(_)
            | Self::NegativeDuration
            | Self::DurationOverflow
            | Self::SpawnError(_)
            | Self::WaitError(_) => exit_codes::INTERNAL_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeoutError>;
