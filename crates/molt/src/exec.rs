//! Process image replacement.

use molt_common::ReplaceError;
use std::path::Path;

/// The irreversible handoff to a new executable.
///
/// A successful `replace` never returns: the calling process's image is
/// substituted in place, inheriting file descriptors and environment.
/// The trait exists so the applier can be driven against a double that
/// records the call instead of terminating the test process.
pub trait ProcessImage {
    fn replace(&mut self, executable: &Path) -> Result<(), ReplaceError>;
}

/// `execv`-backed replacement used by the real binary.
#[derive(Debug, Default)]
pub struct ExecImage;

impl ProcessImage for ExecImage {
    fn replace(&mut self, executable: &Path) -> Result<(), ReplaceError> {
        use std::os::unix::process::CommandExt;

        // exec only comes back on failure.
        let source = std::process::Command::new(executable).exec();
        Err(ReplaceError {
            path: executable.to_path_buf(),
            source,
        })
    }
}
