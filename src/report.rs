use crate::errors::RevealError;
use crate::models::RunStatus;
use std::io::Write;
use tracing::warn;

/// Name used as the prefix of every diagnostic line.
pub const PROGRAM_NAME: &str = "reveal";

/// Writes one diagnostic line per failure and remembers that one happened.
pub struct Reporter<W: Write> {
    program: &'static str,
    stderr: W,
    status: RunStatus,
}

impl<W: Write> Reporter<W> {
    pub fn new(stderr: W) -> Self {
        Self::with_program(PROGRAM_NAME, stderr)
    }

    pub fn with_program(program: &'static str, stderr: W) -> Self {
        Self {
            program,
            stderr,
            status: RunStatus::Success,
        }
    }

    /// Emits `<program>: <message>.` and flips the status to failure.
    pub fn report(&mut self, error: &RevealError) {
        warn!(path = %error.path().display(), %error, "reveal failed");
        self.mark_failed();
        // Nowhere left to complain if stderr itself is gone.
        let _ = writeln!(self.stderr, "{}: {}.", self.program, error);
    }

    /// Flips the status without writing a line.
    pub fn mark_failed(&mut self) {
        self.status = self.status.merge(RunStatus::Failure);
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn into_inner(self) -> W {
        self.stderr
    }
}
