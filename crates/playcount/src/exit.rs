use std::fmt;

use playcount_frame::FrameError;
use playcount_tracker::TrackerError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn data_invalid(message: impl Into<String>) -> Self {
        Self::new(DATA_INVALID, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::AllocationFailure { .. } => {
            CliError::new(INTERNAL, format!("{context}: {err}"))
        }
        FrameError::InvalidWidth { .. }
        | FrameError::InvalidSize(_)
        | FrameError::PayloadTooLarge { .. }
        | FrameError::Truncated { .. } => CliError::data_invalid(format!("{context}: {err}")),
    }
}

pub fn tracker_error(context: &str, err: TrackerError) -> CliError {
    match err {
        TrackerError::Frame(err) => frame_error(context, err),
        TrackerError::TagIo(_) => CliError::data_invalid(format!("{context}: {err}")),
        TrackerError::UnsupportedTag(_) => CliError::new(USAGE, format!("{context}: {err}")),
        TrackerError::MissingTag(_) => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}
