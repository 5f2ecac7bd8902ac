use crate::frame::Frame;

/// Errors that can occur while building, updating, or (de)serializing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload buffer for a frame could not be allocated.
    #[error("failed to allocate {width}-byte frame payload")]
    AllocationFailure { width: usize },

    /// A PCNT counter narrower than the format minimum.
    #[error("invalid counter width ({width} bytes, min {min})")]
    InvalidWidth { width: usize, min: usize },

    /// The serialized frame size field is malformed.
    #[error("invalid frame size field {0:#010x}")]
    InvalidSize(u32),

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Serialized frame data ended before a complete frame.
    #[error("truncated frame ({needed} more bytes needed)")]
    Truncated { needed: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// A counter operation that failed before touching its input.
///
/// The input frame comes back unchanged so the caller can put it back where
/// it was.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct Rejected {
    pub frame: Frame,
    pub error: FrameError,
}

impl From<Rejected> for FrameError {
    fn from(rejected: Rejected) -> Self {
        rejected.error
    }
}
