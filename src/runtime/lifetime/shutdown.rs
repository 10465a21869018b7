use std::process::ExitCode;

use tracing::error;

use crate::errors::Result;
use crate::teleop::{Exit, RunSummary};

/// Map a finished session onto the process exit code
///
/// Quit and interrupt are both clean exits. Errors are logged here and
/// returned so the caller can report them on the console.
pub fn finish_session(result: Result<RunSummary>) -> Result<ExitCode> {
    match result {
        Ok(RunSummary {
            exit: Exit::Quit | Exit::Interrupted,
            ..
        }) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("[{}] {}", e.code(), e);
            Err(e)
        }
    }
}
