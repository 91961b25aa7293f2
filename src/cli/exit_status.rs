use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed and the catalogue is fine
/// - `Failure` (1): Command completed but found problems (invalid entries, unformatted file)
/// - `Error` (2): Command failed due to internal error (config error, IO error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed and the catalogue is fine.
    Success,
    /// Command completed but found problems.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl ExitStatus {
    /// `Failure` if any problem was reported, otherwise `Success`.
    pub fn from_problems(count: usize) -> Self {
        if count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
