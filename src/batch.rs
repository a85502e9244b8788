//! Sequential driver: one path at a time, in argument order.

use crate::args::{classify_all, first_metadata_flag, plan};
use crate::dispatch::Dispatcher;
use crate::errors::RevealError;
use crate::fs::FileSystem;
use crate::identity::IdentityDatabase;
use crate::models::{RevealRequest, RunStatus};
use crate::report::Reporter;
use crate::resolver::resolve;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub struct Batch<F, I> {
    dispatcher: Dispatcher<F, I>,
}

impl<F: FileSystem, I: IdentityDatabase> Batch<F, I> {
    pub fn new(fs: F, identities: I) -> Self {
        Self {
            dispatcher: Dispatcher::new(fs, identities),
        }
    }

    /// Runs a whole command line (program name excluded).
    ///
    /// A metadata flag anywhere short-circuits: its text goes to `stdout` and
    /// no path is touched.
    pub fn run<A, S, O, E>(&self, args: A, stdout: &mut O, stderr: E) -> RunStatus
    where
        A: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
        O: Write,
        E: Write,
    {
        let args = classify_all(args);
        let mut reporter = Reporter::new(stderr);
        if let Some(flag) = first_metadata_flag(&args) {
            debug!(?flag, "printing program metadata");
            if stdout.write_all(flag.text().as_bytes()).and_then(|_| stdout.flush()).is_err() {
                return RunStatus::Failure;
            }
            return RunStatus::Success;
        }
        self.reveal_all(&plan(&args), stdout, &mut reporter);
        reporter.status()
    }

    /// Reveals every request, reporting failures and carrying on.
    ///
    /// A closed stdout ends the batch without diagnostics, since nobody is left
    /// to read the remaining paths; the run still counts as failed.
    pub fn reveal_all<O: Write, E: Write>(
        &self,
        requests: &[RevealRequest],
        stdout: &mut O,
        reporter: &mut Reporter<E>,
    ) {
        for request in requests {
            match self.reveal_one(request, stdout) {
                Ok(()) => {}
                Err(error) if error.is_broken_pipe() => {
                    debug!(path = %error.path().display(), "stdout closed, stopping");
                    reporter.mark_failed();
                    break;
                }
                Err(error) => reporter.report(&error),
            }
        }
    }

    fn reveal_one<O: Write>(&self, request: &RevealRequest, stdout: &mut O) -> crate::Result<()> {
        let path = Path::new(&request.path);
        let metadata = resolve(self.dispatcher.fs(), path, request.selection.transpass)?;
        self.dispatcher
            .dispatch(request.selection.data_type, &metadata, path, stdout)?;
        stdout
            .flush()
            .map_err(|err| RevealError::output(path, err))
    }
}
