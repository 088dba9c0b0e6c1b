/*
 * signal.rs
 *
 * Resolve "TERM", "SIGTERM", "15" to a raw signal number.
 *
 * Deliberately relaxed, mirroring the reference tool: integer tokens pass
 * through verbatim with no bounds check, and empty or unknown names fall
 * back to SIGTERM instead of failing. Resolution happens on the timeout
 * path, after the command has been running for a while - dying there over
 * a typo'd -s value would be worse than sending the default signal.
 *
 * Names are matched case-sensitively against the fixed table the
 * reference tool supports: TERM, INT, HUP, KILL, USR1, USR2.
 */

/// Default signal sent on deadline expiry.
pub const DEFAULT_SIGNAL: i32 = libc::SIGTERM;

/// Resolve a signal token to a raw signal number. Never fails.
///
/// # Examples
///
/// ```
/// use timelimit::signal::resolve_signal;
///
/// assert_eq!(resolve_signal("TERM"), 15);
/// assert_eq!(resolve_signal("SIGKILL"), 9);
/// assert_eq!(resolve_signal("64"), 64);
/// assert_eq!(resolve_signal("no-such-signal"), 15);
/// ```
#[must_use]
pub fn resolve_signal(token: &str) -> i32 {
    let token = token.trim();

    /* integer tokens are used verbatim, no validation */
    if let Ok(num) = token.parse::<i32>() {
        return num;
    }

    /* bare name or conventional SIG prefix */
    let name = token.strip_prefix("SIG").unwrap_or(token);

    match name {
        "TERM" => libc::SIGTERM,
        "INT" => libc::SIGINT,
        "HUP" => libc::SIGHUP,
        "KILL" => libc::SIGKILL,
        "USR1" => libc::SIGUSR1,
        "USR2" => libc::SIGUSR2,
        /* empty or unrecognized: silent fallback, never an error */
        _ => DEFAULT_SIGNAL,
    }
}
