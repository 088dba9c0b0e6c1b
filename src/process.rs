/*
 * process.rs
 *
 * Spawning and lifecycle via posix_spawnp + waitpid. One child per run,
 * owned exclusively by the handle below - never cloned, never shared.
 *
 * posix_spawnp reports exec failures (ENOENT, EACCES) synchronously as
 * its return value, so "command not found" is known before we ever wait.
 * It can also use vfork internally and avoids copying page tables.
 *
 * The wait is a bounded polling loop: waitpid(WNOHANG) every 100ms until
 * the child exits or the deadline passes. A kernel wait-with-timeout
 * would save a few wakeups but every platform spells it differently;
 * 100ms of worst-case latency is fine for a tool that kills by seconds.
 */

use std::ffi::CString;
use std::io;
use std::ptr;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, TimeoutError};

unsafe extern "C" {
    /* environ is a global variable pointing to the environment */
    static environ: *const *mut libc::c_char;
}

/* how often we check on the child while waiting */
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Exit status as reported by waitpid.
#[derive(Debug, Clone, Copy)]
pub struct ExitStatus {
    status: i32,
}

impl ExitStatus {
    /// Returns the exit code if the process exited normally
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        if libc::WIFEXITED(self.status) {
            Some(libc::WEXITSTATUS(self.status))
        } else {
            None
        }
    }

    /// Returns the signal number if the process was killed by a signal
    #[must_use]
    pub fn signal(&self) -> Option<i32> {
        if libc::WIFSIGNALED(self.status) {
            Some(libc::WTERMSIG(self.status))
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(status: i32) -> Self {
        Self { status }
    }
}

/// What a bounded wait observed.
#[derive(Debug)]
pub enum WaitOutcome {
    /// The child terminated within the deadline.
    Completed(ExitStatus),
    /// The deadline elapsed with the child still running.
    TimedOut,
}

/// Handle to the supervised child process.
///
/// Created only by [`spawn`]; at most one exists per invocation. The pid
/// stays private so nothing outside this module can signal or wait on it.
#[derive(Debug)]
pub struct Child {
    pid: libc::pid_t,
    reaped: bool,
}

/// Spawn `program` with `args`, inheriting stdin/stdout/stderr and the
/// environment. PATH is searched.
pub fn spawn(program: &str, args: &[String]) -> Result<Child> {
    /* argv: [program, args..., NULL] */
    let prog = CString::new(program).map_err(|_| TimeoutError::SpawnError(libc::EINVAL))?;

    let mut argv_cstrs: Vec<CString> = Vec::with_capacity(args.len() + 1);
    argv_cstrs.push(prog.clone());
    for arg in args {
        argv_cstrs
            .push(CString::new(arg.as_str()).map_err(|_| TimeoutError::SpawnError(libc::EINVAL))?);
    }

    let mut argv: Vec<*mut libc::c_char> = argv_cstrs
        .iter()
        .map(|c| c.as_ptr().cast_mut())
        .collect();
    argv.push(ptr::null_mut());

    /* null attr and file actions: child inherits everything */
    let mut pid: libc::pid_t = 0;
    // SAFETY: pid is a valid out pointer, prog and argv are NUL-terminated
    // and outlive the call, environ is the process environment. Null
    // file_actions/attrp are permitted by POSIX and mean "no changes".
    let ret = unsafe {
        libc::posix_spawnp(
            &mut pid,
            prog.as_ptr(),
            ptr::null(),
            ptr::null(),
            argv.as_ptr(),
            environ,
        )
    };

    if ret != 0 {
        return Err(match ret {
            libc::ENOENT => TimeoutError::CommandNotFound(program.into()),
            libc::EACCES | libc::EPERM => TimeoutError::PermissionDenied(program.into()),
            e => TimeoutError::SpawnError(e),
        });
    }

    Ok(Child { pid, reaped: false })
}

impl Child {
    /// Process ID, for diagnostics.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.pid
    }

    /* non-blocking status check */
    fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        if self.reaped {
            return Ok(None);
        }

        let mut status: i32 = 0;
        // SAFETY: pid came from posix_spawnp, status is a valid out pointer
        let ret = unsafe { libc::waitpid(self.pid, &mut status, libc::WNOHANG) };

        if ret < 0 {
            return Err(TimeoutError::WaitError(errno()));
        }

        if ret == 0 {
            /* still running */
            return Ok(None);
        }

        self.reaped = true;
        Ok(Some(ExitStatus { status }))
    }

    /// Block until the child terminates or `limit` elapses, whichever
    /// comes first.
    ///
    /// The status check runs before the clock check, so a zero limit still
    /// observes a child that has already exited; otherwise zero expires on
    /// the first pass.
    pub fn wait_deadline(&mut self, limit: Duration) -> Result<WaitOutcome> {
        let start = Instant::now();

        loop {
            if let Some(status) = self.try_wait()? {
                return Ok(WaitOutcome::Completed(status));
            }

            let elapsed = start.elapsed();
            if elapsed >= limit {
                return Ok(WaitOutcome::TimedOut);
            }

            thread::sleep(POLL_INTERVAL.min(limit - elapsed));
        }
    }

    /// Deliver `signal` to the child. Best effort: failure never aborts
    /// supervision.
    ///
    /// ESRCH means the child exited between our timeout check and the
    /// kill - the expected race; the next wait observes the exit. EINVAL
    /// means a signal number the kernel rejects, which the command line
    /// accepts verbatim. Either way the deadline already expired and the
    /// wait/escalation path must keep running, so errors are swallowed.
    pub fn deliver(&self, signal: i32) {
        if self.reaped {
            return;
        }

        // SAFETY: kill has no memory preconditions; pid is our child's
        let _ = unsafe { libc::kill(self.pid, signal) };
    }

    /// Deliver the unconditional kill signal. Not configurable.
    pub fn force_kill(&self) {
        self.deliver(libc::SIGKILL);
    }
}

fn errno() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/*
 * Spawning tests hit the real OS - they run `true`, `false`, `sleep`.
 * Pure status decoding is covered without spawning anything.
 */
