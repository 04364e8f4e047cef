//! Error codes and exit status for logsift

use logsift_common::LogsiftError;
use thiserror::Error;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors (bad config, report serialization)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when required arguments are missing (EX_USAGE)
pub const EXIT_USAGE: i32 = 64;

/// Exit code when the log file or report destination fails (EX_IOERR)
pub const EXIT_IO_ERROR: i32 = 74;

/// Invalid invocation detected after argument parsing
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("no input file: pass --input <FILE> or set analysis.default_input in the config")]
    MissingInput,
}

/// Pick the exit code for an error bubbled up to `main`
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.downcast_ref::<UsageError>().is_some() {
            return EXIT_USAGE;
        }
        if let Some(err) = cause.downcast_ref::<LogsiftError>() {
            return if err.is_io() {
                EXIT_IO_ERROR
            } else {
                EXIT_GENERAL_ERROR
            };
        }
    }
    EXIT_GENERAL_ERROR
}
