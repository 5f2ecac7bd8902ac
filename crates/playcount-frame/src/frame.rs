use std::fmt;

use tracing::debug;

use crate::error::{FrameError, Result};

/// Minimum PCNT counter width in bytes (a 32-bit counter).
pub const MIN_COUNTER_WIDTH: usize = 4;

/// A 4-character ID3v2 frame identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId([u8; 4]);

impl FrameId {
    /// Play counter.
    pub const PCNT: FrameId = FrameId(*b"PCNT");

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns true for an all-zero id, which marks the start of tag padding.
    pub fn is_padding(&self) -> bool {
        self.0 == [0; 4]
    }
}

impl From<[u8; 4]> for FrameId {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// A single ID3v2 frame: identifier, opaque flags, and payload.
///
/// The payload of a PCNT frame is a big-endian unsigned counter of at least
/// [`MIN_COUNTER_WIDTH`] bytes. Frames of any other type are carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    id: FrameId,
    flags: u16,
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame with an arbitrary id and payload.
    ///
    /// A PCNT payload narrower than [`MIN_COUNTER_WIDTH`] is rejected.
    pub fn new(id: FrameId, flags: u16, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        if id == FrameId::PCNT && data.len() < MIN_COUNTER_WIDTH {
            return Err(FrameError::InvalidWidth {
                width: data.len(),
                min: MIN_COUNTER_WIDTH,
            });
        }
        Ok(Self { id, flags, data })
    }

    /// Create a zeroed PCNT frame of the minimum width.
    pub fn pcnt() -> Result<Self> {
        Self::pcnt_with_width(MIN_COUNTER_WIDTH)
    }

    /// Create a zeroed PCNT frame with a `width`-byte counter.
    pub fn pcnt_with_width(width: usize) -> Result<Self> {
        if width < MIN_COUNTER_WIDTH {
            return Err(FrameError::InvalidWidth {
                width,
                min: MIN_COUNTER_WIDTH,
            });
        }

        let mut data = Vec::new();
        data.try_reserve_exact(width)
            .map_err(|_| FrameError::AllocationFailure { width })?;
        data.resize(width, 0);

        debug!(width, "allocated PCNT frame");
        Ok(Self {
            id: FrameId::PCNT,
            flags: 0,
            data,
        })
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Payload length in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn set_flags(&mut self, flags: u16) {
        self.flags = flags;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn is_pcnt(&self) -> bool {
        self.id == FrameId::PCNT
    }
}
