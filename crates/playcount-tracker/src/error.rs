/// Errors that can occur while tracking play counts.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] playcount_frame::FrameError),

    /// The host tag provider failed to read or write a tag.
    #[error("tag I/O failed: {0}")]
    TagIo(String),

    /// The track carries a tag format without PCNT frames.
    #[error("track {0} does not use ID3v2 tags")]
    UnsupportedTag(String),

    /// The track has no tag and creating one is disabled.
    #[error("track {0} has no ID3v2 tag")]
    MissingTag(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
