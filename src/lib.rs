/*
 * lib.rs
 *
 * Exists mostly for testing. Integration tests need our types, doc tests
 * need a lib. You could use this as a library but honestly just shell out.
 */

//! # timelimit
//!
//! Run a command under a wall-clock deadline. If it has not exited by the
//! deadline, a signal is delivered, optionally escalating to SIGKILL after
//! a second deadline.
//!
//! ## Quick Start
//!
//! ```rust
//! use timelimit::{parse_duration, resolve_signal};
//! use std::time::Duration;
//!
//! // Parse duration strings
//! let dur = parse_duration("30s").unwrap();
//! assert_eq!(dur, Duration::from_secs(30));
//!
//! // Resolve signal tokens - never fails, unknown names default to TERM
//! assert_eq!(resolve_signal("TERM"), 15);
//! assert_eq!(resolve_signal("9"), 9);
//! ```

pub mod args;
pub mod duration;
pub mod error;
pub mod process;
pub mod runner;
pub mod signal;

pub use args::Args;
pub use duration::parse_duration;
pub use error::{Result, TimeoutError, exit_codes};
pub use process::{Child, ExitStatus, WaitOutcome};
pub use runner::{RunConfig, RunResult, run_command};
pub use signal::{DEFAULT_SIGNAL, resolve_signal};
