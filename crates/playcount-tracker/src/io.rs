use std::collections::HashMap;

use bytes::BytesMut;
use playcount_frame::{decode_tag_frames, encode_tag_frames, Tag, Version, WireConfig};
use tracing::trace;

use crate::error::{Result, TrackerError};
use crate::track::TrackRef;

/// Loads and stores a track's tag. Implemented by the host.
pub trait TagIo {
    /// Parse the track's tag, or `None` when the track has none.
    fn read_tag(&self, track: &TrackRef) -> Result<Option<Tag>>;

    /// Persist `tag` as the track's tag.
    fn write_tag(&mut self, track: &TrackRef, tag: &Tag) -> Result<()>;
}

/// Keeps serialized tag frame areas in memory, keyed by track URI.
///
/// Tags go through the wire codec on every write and read, so what comes back
/// is exactly what a host writing frames to disk would see.
#[derive(Debug, Default)]
pub struct MemoryTagIo {
    tags: HashMap<String, (Version, Vec<u8>)>,
    max_payload_size: Option<usize>,
}

impl MemoryTagIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the payload size accepted when decoding stored frames.
    pub fn with_max_payload_size(max_payload_size: usize) -> Self {
        Self {
            tags: HashMap::new(),
            max_payload_size: Some(max_payload_size),
        }
    }

    /// Store raw frame bytes for a track, as if read from its file.
    pub fn insert_raw(&mut self, uri: impl Into<String>, version: Version, frames: Vec<u8>) {
        self.tags.insert(uri.into(), (version, frames));
    }

    /// The stored frame bytes for a track.
    pub fn raw(&self, uri: &str) -> Option<&[u8]> {
        self.tags.get(uri).map(|(_, bytes)| bytes.as_slice())
    }
}

impl TagIo for MemoryTagIo {
    fn read_tag(&self, track: &TrackRef) -> Result<Option<Tag>> {
        let Some((version, bytes)) = self.tags.get(&track.uri) else {
            return Ok(None);
        };

        let mut config = WireConfig {
            version: *version,
            ..WireConfig::default()
        };
        if let Some(max) = self.max_payload_size {
            config.max_payload_size = max;
        }

        let tag = decode_tag_frames(bytes, &config)
            .map_err(|err| TrackerError::TagIo(format!("{}: {err}", track.uri)))?;
        trace!(uri = %track.uri, frames = tag.len(), "read tag");
        Ok(Some(tag))
    }

    fn write_tag(&mut self, track: &TrackRef, tag: &Tag) -> Result<()> {
        let mut buf = BytesMut::new();
        encode_tag_frames(tag, &mut buf)?;
        self.tags
            .insert(track.uri.clone(), (tag.version(), buf.to_vec()));
        trace!(uri = %track.uri, bytes = buf.len(), "wrote tag");
        Ok(())
    }
}
