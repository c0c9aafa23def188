//! Runs the translation generator with at most one run in flight.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{Builder as ThreadBuilder, JoinHandle};
use std::time::Instant;

use tracing::{debug, error, info, warn};

/// Result of a single generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    /// The command exited unsuccessfully. `None` when killed by a signal.
    Failed(Option<i32>),
    /// The shell could not be started.
    SpawnFailed,
}

/// What [`Regenerator::trigger`] did with a request.
#[derive(Debug)]
pub enum Trigger {
    /// A worker started; it finishes after the run and any coalesced rerun.
    Started(JoinHandle<()>),
    /// A run was already in flight; one rerun is queued behind it.
    Coalesced,
    /// No worker thread could be created.
    Unavailable,
}

#[derive(Debug, Default)]
struct RunState {
    running: bool,
    pending: bool,
}

/// Runs a shell command on demand, one run at a time.
///
/// Requests that arrive while a run is in flight collapse into a single
/// follow-up run, so the generator always sees the latest sources without
/// piling up.
#[derive(Debug, Clone)]
pub struct Regenerator {
    command: String,
    cwd: PathBuf,
    state: Arc<Mutex<RunState>>,
}

impl Regenerator {
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.into(),
            state: Arc::default(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        lock(&self.state).running
    }

    /// Request a run.
    pub fn trigger(&self) -> Trigger {
        {
            let mut state = lock(&self.state);
            if state.running {
                state.pending = true;
                debug!("generator already running; coalescing request");
                return Trigger::Coalesced;
            }
            state.running = true;
        }

        let command = self.command.clone();
        let cwd = self.cwd.clone();
        let state = Arc::clone(&self.state);
        let spawned = ThreadBuilder::new()
            .name("glossa-regenerate".to_string())
            .spawn(move || {
                loop {
                    run_command(&command, &cwd);
                    let mut guard = lock(&state);
                    if guard.pending {
                        guard.pending = false;
                        continue;
                    }
                    guard.running = false;
                    break;
                }
            });

        match spawned {
            Ok(handle) => Trigger::Started(handle),
            Err(e) => {
                error!("cannot start generator thread: {e}");
                let mut state = lock(&self.state);
                state.running = false;
                state.pending = false;
                Trigger::Unavailable
            }
        }
    }
}

fn lock(state: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `command` through the platform shell in `cwd`, logging the outcome.
pub fn run_command(command: &str, cwd: &Path) -> RunOutcome {
    info!("running `{command}`");
    let started = Instant::now();

    let output = match shell(command).current_dir(cwd).output() {
        Ok(output) => output,
        Err(e) => {
            error!("failed to start `{command}`: {e}");
            return RunOutcome::SpawnFailed;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        debug!("{}", stdout.trim_end());
    }

    if output.status.success() {
        if !stderr.trim().is_empty() {
            debug!("{}", stderr.trim_end());
        }
        info!("translations regenerated in {:.2?}", started.elapsed());
        RunOutcome::Succeeded
    } else {
        warn!(
            status = %output.status,
            "`{command}` failed: {}",
            stderr.trim_end()
        );
        RunOutcome::Failed(output.status.code())
    }
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn successful_command() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_command("exit 0", dir.path()), RunOutcome::Succeeded);
    }

    #[test]
    fn stderr_output_does_not_fail_a_run() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            run_command("echo 'deprecated option' >&2", dir.path()),
            RunOutcome::Succeeded
        );
    }

    #[test]
    fn failing_command_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_command("exit 3", dir.path()), RunOutcome::Failed(Some(3)));
    }

    #[test]
    fn missing_working_directory_is_spawn_failure() {
        assert_eq!(
            run_command("exit 0", Path::new("/nonexistent/glossa-cwd")),
            RunOutcome::SpawnFailed
        );
    }

    #[test]
    fn command_runs_in_working_directory() {
        let dir = TempDir::new().unwrap();
        run_command("echo generated > out.txt", dir.path());
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).unwrap().trim(),
            "generated"
        );
    }

    #[test]
    fn overlapping_triggers_coalesce_into_one_rerun() {
        let dir = TempDir::new().unwrap();
        let regenerator = Regenerator::new("echo run >> runs.txt; sleep 0.3", dir.path());

        let Trigger::Started(handle) = regenerator.trigger() else {
            panic!("first trigger should start a run");
        };
        assert!(regenerator.is_running());
        assert!(matches!(regenerator.trigger(), Trigger::Coalesced));
        assert!(matches!(regenerator.trigger(), Trigger::Coalesced));
        handle.join().unwrap();

        let runs = fs::read_to_string(dir.path().join("runs.txt")).unwrap();
        assert_eq!(runs.lines().count(), 2);
        assert!(!regenerator.is_running());
    }

    #[test]
    fn trigger_after_completion_starts_again() {
        let dir = TempDir::new().unwrap();
        let regenerator = Regenerator::new("echo run >> runs.txt", dir.path());

        for _ in 0..2 {
            let Trigger::Started(handle) = regenerator.trigger() else {
                panic!("idle regenerator should start a run");
            };
            handle.join().unwrap();
        }

        let runs = fs::read_to_string(dir.path().join("runs.txt")).unwrap();
        assert_eq!(runs.lines().count(), 2);
    }

    #[test]
    fn failed_run_releases_guard() {
        let dir = TempDir::new().unwrap();
        let regenerator = Regenerator::new("exit 1", dir.path());

        let Trigger::Started(handle) = regenerator.trigger() else {
            panic!("idle regenerator should start a run");
        };
        handle.join().unwrap();
        assert!(!regenerator.is_running());
    }
}
