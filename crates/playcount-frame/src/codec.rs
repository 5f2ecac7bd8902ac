use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};
use crate::frame::{Frame, FrameId, MIN_COUNTER_WIDTH};
use crate::tag::{Tag, Version};

/// Frame header: id (4) + size (4) + flags (2) = 10 bytes.
pub const HEADER_SIZE: usize = 10;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Largest size a 28-bit synchsafe integer can carry.
pub const MAX_SYNCHSAFE: u32 = 0x0FFF_FFFF;

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct WireConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
    /// Tag version governing the size field encoding.
    pub version: Version,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            version: Version::default(),
        }
    }
}

/// Encode a frame into the ID3v2 wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬──────────────────┬────────────┬─────────────────┐
/// │ Id (4B)      │ Size (4B BE)     │ Flags      │ Payload          │
/// │ "PCNT"       │ v2.3: plain u32  │ (2B BE)    │ (Size bytes)     │
/// │              │ v2.4: synchsafe  │            │                  │
/// └──────────────┴──────────────────┴────────────┴─────────────────┘
/// ```
pub fn encode_frame(frame: &Frame, version: Version, dst: &mut BytesMut) -> Result<()> {
    let size = frame.size();
    let max = match version {
        Version::Id3v23 => u32::MAX as usize,
        Version::Id3v24 => MAX_SYNCHSAFE as usize,
    };
    if size > max {
        return Err(FrameError::PayloadTooLarge { size, max });
    }

    dst.reserve(HEADER_SIZE + size);
    dst.put_slice(frame.id().as_bytes());
    match version {
        Version::Id3v23 => dst.put_u32(size as u32),
        Version::Id3v24 => dst.put_u32(to_synchsafe(size as u32)),
    }
    dst.put_u16(frame.flags());
    dst.put_slice(frame.data());
    Ok(())
}

/// Decode one frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, config: &WireConfig) -> Result<Option<Frame>> {
    let Some(header) = peek_header(src, config)? else {
        return Ok(None); // Need more data
    };

    if src.len() < HEADER_SIZE + header.size {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(header.size);

    Frame::new(header.id, header.flags, payload.to_vec()).map(Some)
}

/// Serialize every frame of `tag` back to back, using the tag's version.
pub fn encode_tag_frames(tag: &Tag, dst: &mut BytesMut) -> Result<()> {
    for frame in tag.frames() {
        encode_frame(frame, tag.version(), dst)?;
    }
    Ok(())
}

/// Parse the frame area of a tag (everything after the tag header).
///
/// Stops at the first padding byte. Unlike [`decode_frame`], running out of
/// data mid-frame is an error here since the whole area is available.
pub fn decode_tag_frames(bytes: &[u8], config: &WireConfig) -> Result<Tag> {
    let mut src = BytesMut::from(bytes);
    let mut frames = Vec::new();

    while !src.is_empty() && src[0] != 0 {
        if let Some(frame) = decode_frame(&mut src, config)? {
            frames.push(frame);
            continue;
        }

        let needed = match peek_header(&src, config)? {
            Some(header) => HEADER_SIZE + header.size - src.len(),
            None => HEADER_SIZE - src.len(),
        };
        return Err(FrameError::Truncated { needed });
    }

    Ok(Tag::with_frames(config.version, frames))
}

struct Header {
    id: FrameId,
    size: usize,
    flags: u16,
}

fn peek_header(src: &[u8], config: &WireConfig) -> Result<Option<Header>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let id = FrameId::new([src[0], src[1], src[2], src[3]]);
    let raw = u32::from_be_bytes([src[4], src[5], src[6], src[7]]);
    let flags = u16::from_be_bytes([src[8], src[9]]);

    let size = match config.version {
        Version::Id3v23 => raw,
        Version::Id3v24 => from_synchsafe(raw).ok_or(FrameError::InvalidSize(raw))?,
    } as usize;

    if size > config.max_payload_size {
        return Err(FrameError::PayloadTooLarge {
            size,
            max: config.max_payload_size,
        });
    }
    if id == FrameId::PCNT && size < MIN_COUNTER_WIDTH {
        return Err(FrameError::InvalidWidth {
            width: size,
            min: MIN_COUNTER_WIDTH,
        });
    }

    Ok(Some(Header { id, size, flags }))
}

fn to_synchsafe(n: u32) -> u32 {
    (n & 0x7F) | ((n & 0x3F80) << 1) | ((n & 0x1F_C000) << 2) | ((n & 0x0FE0_0000) << 3)
}

fn from_synchsafe(raw: u32) -> Option<u32> {
    if raw & 0x8080_8080 != 0 {
        return None;
    }
    Some(
        (raw & 0x7F)
            | ((raw >> 1) & 0x3F80)
            | ((raw >> 2) & 0x1F_C000)
            | ((raw >> 3) & 0x0FE0_0000),
    )
}
