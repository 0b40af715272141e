//! The language-analysis backend resource attached to each agent.
//!
//! The backend is an external process (a language server) launched from the
//! project configuration. Its lifecycle is explicit: started once when the
//! agent is constructed, stopped exactly once during the server's shutdown
//! sweep. Projects without a configured command still get a backend handle
//! so the lifecycle invariants hold uniformly.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while managing the backend process.
#[derive(Debug, Error)]
pub enum BackendError {
    /// `start()` was called on a backend that is already running.
    #[error("Language backend is already running")]
    AlreadyRunning,

    /// `stop()` was called on a backend that is not running.
    #[error("Language backend is not running")]
    NotRunning,

    /// The backend command could not be spawned.
    #[error("Failed to launch language backend '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend process could not be terminated cleanly.
    #[error("Failed to stop language backend: {0}")]
    Stop(#[from] std::io::Error),
}

#[derive(Debug)]
enum Phase {
    Idle,
    Running(Option<Child>),
    Stopped,
}

/// Handle to an agent's language-analysis backend.
pub struct LanguageServerBackend {
    command: Option<Vec<String>>,
    phase: Mutex<Phase>,
}

impl LanguageServerBackend {
    /// Create a backend handle from an optional launch command.
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self {
            command,
            phase: Mutex::new(Phase::Idle),
        }
    }

    /// Start the backend, spawning the configured process if any.
    pub fn start(&self) -> Result<(), BackendError> {
        let mut phase = self.lock_phase();
        match *phase {
            Phase::Idle | Phase::Stopped => {}
            Phase::Running(_) => return Err(BackendError::AlreadyRunning),
        }

        let child = match self.command.as_deref() {
            Some(command @ [program, args @ ..]) => {
                info!("Launching language backend: {}", command.join(" "));
                let child = Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .spawn()
                    .map_err(|e| BackendError::Launch {
                        command: command.join(" "),
                        source: e,
                    })?;
                Some(child)
            }
            _ => {
                info!("No language backend command configured; running without one");
                None
            }
        };

        *phase = Phase::Running(child);
        Ok(())
    }

    /// Stop the backend, terminating the spawned process if any.
    ///
    /// Stopping a backend that was never started (or was already stopped)
    /// is an error, which makes the "stopped exactly once" shutdown
    /// invariant observable.
    pub fn stop(&self) -> Result<(), BackendError> {
        let mut phase = self.lock_phase();
        let Phase::Running(child) = &mut *phase else {
            return Err(BackendError::NotRunning);
        };

        if let Some(mut child) = child.take() {
            info!("Stopping language backend (pid {})", child.id());
            child.kill()?;
            child.wait()?;
        }

        *phase = Phase::Stopped;
        Ok(())
    }

    /// Whether the backend is currently running.
    pub fn is_running(&self) -> bool {
        matches!(*self.lock_phase(), Phase::Running(_))
    }

    /// Whether the backend has been stopped.
    pub fn is_stopped(&self) -> bool {
        matches!(*self.lock_phase(), Phase::Stopped)
    }

    fn lock_phase(&self) -> std::sync::MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(|poisoned| {
            warn!("Backend state lock poisoned; continuing with inner state");
            poisoned.into_inner()
        })
    }
}
