//! Codec for the ID3v2 PCNT (play counter) frame.
//!
//! A PCNT payload is an unsigned big-endian integer of at least 4 bytes that
//! grows by one byte whenever it would otherwise overflow:
//! - [`Frame::pcnt`] allocates a zeroed counter
//! - [`get_count`] / [`set_count`] convert to and from `u64`
//! - [`increment`] adds one directly on the bytes, for counters of any width
//! - [`Tag`] is the ordered frame list used to locate the counter
//!
//! Width changes hand back a new frame through [`CountUpdate::Replaced`];
//! the caller relinks it (see [`Tag::update`]) and drops the stale one.

pub mod codec;
pub mod counter;
pub mod error;
pub mod frame;
pub mod tag;

pub use codec::{
    decode_frame, decode_tag_frames, encode_frame, encode_tag_frames, WireConfig,
    DEFAULT_MAX_PAYLOAD, HEADER_SIZE,
};
pub use counter::{
    get_count, increment, set_count, width_for, Count, CountResult, CountUpdate, MAX_NATIVE_WIDTH,
};
pub use error::{FrameError, Rejected, Result};
pub use frame::{Frame, FrameId, MIN_COUNTER_WIDTH};
pub use tag::{Tag, Updated, Version};
