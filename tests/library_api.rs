/*
 * library_api.rs
 *
 * integration-style tests exercising timelimit as a library.
 *
 * goal: ensure the public API is usable without shelling out to the CLI.
 */

use std::time::Duration;

use timelimit::error::exit_codes;
use timelimit::runner::{RunConfig, RunResult, run_command};
use timelimit::signal::DEFAULT_SIGNAL;
use timelimit::{parse_duration, resolve_signal};

fn basic_config(timeout: Duration) -> RunConfig {
    RunConfig {
        timeout,
        kill_after: Some(Duration::from_millis(200)),
        ..RunConfig::default()
    }
}

/* =========================================================================
 * BASIC COMMAND EXECUTION
 * ========================================================================= */

#[test]
fn library_run_command_completes() {
    let config = basic_config(Duration::from_secs(5));
    let args = ["-c".to_string(), "exit 0".to_string()];

    let result = run_command("sh", &args, &config).expect("run_command should succeed");

    match result {
        RunResult::Completed(status) => assert_eq!(status.code(), Some(0)),
        RunResult::TimedOut { .. } => panic!("expected Completed, got TimedOut"),
    }
}

#[test]
fn library_run_command_nonzero_exit() {
    let config = basic_config(Duration::from_secs(5));
    let args = ["-c".to_string(), "exit 42".to_string()];

    let result = run_command("sh", &args, &config).expect("run_command should succeed");

    match &result {
        RunResult::Completed(status) => {
            assert_eq!(status.code(), Some(42));
            assert_eq!(result.exit_code(false), 42);
        }
        RunResult::TimedOut { .. } => panic!("expected Completed, got TimedOut"),
    }
}

#[test]
fn library_run_command_times_out() {
    let config = basic_config(Duration::from_millis(150));
    let args = ["10".to_string()];

    let result = run_command("sleep", &args, &config).expect("run_command should succeed");

    match &result {
        RunResult::TimedOut { killed, status } => {
            /* sleep dies from the TERM inside the grace period */
            assert!(!killed, "sleep should not need escalation");
            let status = status.expect("grace wait should observe the exit");
            assert_eq!(status.signal(), Some(libc::SIGTERM));
            assert_eq!(result.exit_code(false), exit_codes::TIMEOUT);
            assert_eq!(result.exit_code(true), 0);
        }
        RunResult::Completed(_) => panic!("expected TimedOut, got Completed"),
    }
}

#[test]
fn library_run_command_escalates() {
    let config = RunConfig {
        timeout: Duration::from_millis(150),
        kill_after: Some(Duration::from_millis(300)),
        ..RunConfig::default()
    };
    let args = [
        "-c".to_string(),
        "trap '' TERM; sleep 10".to_string(),
    ];

    let result = run_command("sh", &args, &config).expect("run_command should succeed");

    match &result {
        RunResult::TimedOut { killed, .. } => {
            assert!(*killed, "TERM-trapping child must be force-killed");
            assert_eq!(result.exit_code(false), exit_codes::KILLED);
            assert_eq!(result.exit_code(true), exit_codes::KILLED);
        }
        RunResult::Completed(_) => panic!("expected TimedOut, got Completed"),
    }
}

#[test]
fn library_zero_timeout_expires_immediately() {
    let config = basic_config(Duration::ZERO);
    let args = ["10".to_string()];

    let result = run_command("sleep", &args, &config).expect("run_command should succeed");

    assert!(matches!(result, RunResult::TimedOut { .. }));
}

/* =========================================================================
 * ERROR HANDLING
 * ========================================================================= */

#[test]
fn library_run_command_not_found() {
    let config = basic_config(Duration::from_secs(5));
    let args: [String; 0] = [];

    match run_command("nonexistent_command_xyz_12345", &args, &config) {
        Err(err) => assert_eq!(err.exit_code(), exit_codes::NOT_FOUND),
        Ok(_) => panic!("expected error for nonexistent command"),
    }
}

#[test]
fn library_run_command_permission_denied() {
    let config = basic_config(Duration::from_secs(5));
    let args: [String; 0] = [];

    match run_command("/dev/null", &args, &config) {
        Err(err) => assert_eq!(err.exit_code(), exit_codes::CANNOT_INVOKE),
        Ok(_) => panic!("expected error for non-executable path"),
    }
}

/* =========================================================================
 * PARSING HELPERS
 * ========================================================================= */

#[test]
fn library_parse_duration_works() {
    assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
    assert_eq!(parse_duration("1.5m").unwrap(), Duration::from_secs(90));
}

#[test]
fn library_resolve_signal_works() {
    assert_eq!(resolve_signal("TERM"), libc::SIGTERM);
    assert_eq!(resolve_signal("9"), 9);
    assert_eq!(resolve_signal("whatever"), DEFAULT_SIGNAL);
}
