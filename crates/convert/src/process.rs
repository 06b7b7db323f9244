//! Supervised execution of external conversion programs.

use docimg_core::{Error, Result};
use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStderr, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// How long to keep collecting stderr after the program has exited.
const STDERR_GRACE: Duration = Duration::from_secs(1);

/// Run `command` to completion, killing it once `timeout` elapses.
///
/// Stdin is closed and stdout discarded; stderr is captured for the log.
/// A zero exit status is success, anything else is [`Error::Backend`].
///
/// On unix the program runs in its own process group, and the whole group
/// is killed on timeout. Helpers it leaves behind holding stderr open do not
/// delay the return past [`STDERR_GRACE`].
pub fn run(mut command: Command, backend: &'static str, timeout: Duration) -> Result<()> {
    log::debug!("Launching {}: {:?}", backend, command);

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    isolate(&mut command);

    let mut child = command.spawn().map_err(|e| {
        log::warn!("Failed to launch {}: {}", backend, e);
        Error::IoError(e)
    })?;

    let stderr = child.stderr.take().map(read_lines);

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            kill_group(&mut child, backend);
            log::warn!(
                "{} did not finish within {} seconds and was killed",
                backend,
                timeout.as_secs()
            );
            return Err(Error::Timeout {
                backend,
                seconds: timeout.as_secs(),
            });
        }
        Err(e) => {
            kill_group(&mut child, backend);
            return Err(Error::IoError(e));
        }
    };

    let captured = stderr
        .map(|lines| collect_lines(&lines, backend))
        .unwrap_or_default();

    if status.success() {
        for line in &captured {
            log::debug!("[{}] {}", backend, line);
        }
        log::debug!("{} completed successfully", backend);
        Ok(())
    } else {
        for line in &captured {
            log::warn!("[{}] {}", backend, line);
        }
        Err(Error::Backend {
            backend,
            code: status.code().unwrap_or(-1),
        })
    }
}

#[cfg(unix)]
fn isolate(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn isolate(_command: &mut Command) {}

/// Kill the child's process group (or just the child off unix) and reap it.
fn kill_group(child: &mut Child, backend: &str) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Err(e) = killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL) {
            log::debug!("Could not kill process group of {}: {}", backend, e);
        }
    }
    if let Err(e) = child.kill() {
        log::debug!("Could not kill {}: {}", backend, e);
    }
    let _ = child.wait();
}

/// Drain stderr on the side so a chatty child cannot fill the pipe and stall.
fn read_lines(pipe: ChildStderr) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                    // Keep draining after the receiver is gone.
                    let _ = tx.send(line);
                }
            }
        }
    });
    rx
}

/// Gather stderr lines until the pipe closes or [`STDERR_GRACE`] runs out.
fn collect_lines(lines: &Receiver<String>, backend: &str) -> Vec<String> {
    let deadline = Instant::now() + STDERR_GRACE;
    let mut captured = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match lines.recv_timeout(remaining) {
            Ok(line) => captured.push(line),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                log::debug!(
                    "{} exited but its stderr is still open; not waiting for it",
                    backend
                );
                break;
            }
        }
    }
    captured
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    fn shell(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[test]
    fn test_zero_exit_is_success() {
        assert!(run(shell("echo ok; echo noise >&2"), "sh", Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn test_nonzero_exit_is_backend_error() {
        let result = run(shell("exit 3"), "sh", Duration::from_secs(10));
        assert!(matches!(
            result,
            Err(Error::Backend {
                backend: "sh",
                code: 3
            })
        ));
    }

    #[test]
    fn test_timeout_kills_child() {
        let started = Instant::now();
        let result = run(shell("exec sleep 30"), "sh", Duration::from_millis(200));
        assert!(matches!(result, Err(Error::Timeout { backend: "sh", .. })));
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[test]
    fn test_timeout_kills_background_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("helper-survived");
        let script = format!("(sleep 2; touch '{}') & wait", marker.display());

        let result = run(shell(&script), "sh", Duration::from_millis(300));

        assert!(matches!(result, Err(Error::Timeout { .. })));
        std::thread::sleep(Duration::from_secs(3));
        assert!(!marker.exists());
    }

    #[test]
    fn test_lingering_helper_does_not_block_return() {
        let started = Instant::now();
        let result = run(shell("sleep 8 & exit 0"), "sh", Duration::from_secs(1));
        assert!(result.is_ok());
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_collect_lines_until_pipe_closes() {
        let (tx, rx) = mpsc::channel();
        tx.send("first".to_string()).unwrap();
        tx.send("second".to_string()).unwrap();
        drop(tx);
        assert_eq!(collect_lines(&rx, "sh"), vec!["first", "second"]);
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let result = run(
            Command::new("/nonexistent/docimg-no-such-program"),
            "missing",
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_large_stderr_does_not_stall() {
        let result = run(
            shell("i=0; while [ $i -lt 20000 ]; do echo 'warning line' >&2; i=$((i+1)); done"),
            "sh",
            Duration::from_secs(30),
        );
        assert!(result.is_ok());
    }
}
