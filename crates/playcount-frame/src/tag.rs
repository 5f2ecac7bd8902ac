use tracing::debug;

use crate::counter::CountResult;
use crate::error::{Rejected, Result};
use crate::frame::{Frame, FrameId};

/// ID3v2 major version of a tag. PCNT layout is identical in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    Id3v23,
    #[default]
    Id3v24,
}

impl Version {
    pub fn major(self) -> u8 {
        match self {
            Version::Id3v23 => 3,
            Version::Id3v24 => 4,
        }
    }
}

/// Outcome of [`Tag::update`] on a matching frame.
#[derive(Debug)]
pub enum Updated {
    /// The frame in the tag was updated where it sits.
    InPlace,
    /// A new frame took the old one's position; the stale frame is returned.
    Relinked(Frame),
}

/// The ordered frame list of one ID3v2 tag.
///
/// Order is the order frames were read from storage, with appended frames at
/// the tail. Lookups and removal always act on the first matching frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    version: Version,
    frames: Vec<Frame>,
}

impl Tag {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            frames: Vec::new(),
        }
    }

    /// Build a tag from frames in storage order.
    pub fn with_frames(version: Version, frames: Vec<Frame>) -> Self {
        Self { version, frames }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Link `frame` after the current tail.
    pub fn append(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn find(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id() == id)
    }

    pub fn find_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id() == id)
    }

    /// Detach the first frame with `id` and hand it to the caller.
    pub fn remove(&mut self, id: FrameId) -> Option<Frame> {
        let idx = self.position(id)?;
        Some(self.frames.remove(idx))
    }

    /// Swap the first frame with `id` for `frame`, keeping its position.
    ///
    /// Returns the detached frame, or gives `frame` back in `Err` when no
    /// frame matches.
    pub fn replace(&mut self, id: FrameId, frame: Frame) -> std::result::Result<Frame, Frame> {
        match self.position(id) {
            Some(idx) => Ok(std::mem::replace(&mut self.frames[idx], frame)),
            None => Err(frame),
        }
    }

    /// Apply a counter operation to the first frame with `id`.
    ///
    /// The authoritative frame goes back at the same position. Returns `None`
    /// when no frame matches. If `op` fails, the frame it hands back is
    /// restored and the tag is left as it was.
    pub fn update<F>(&mut self, id: FrameId, op: F) -> Result<Option<Updated>>
    where
        F: FnOnce(Frame) -> CountResult,
    {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };

        let current = self.frames.remove(idx);
        let (frame, stale) = match op(current) {
            Ok(update) => update.into_parts(),
            Err(Rejected { frame, error }) => {
                self.frames.insert(idx, frame);
                return Err(error);
            }
        };
        let updated = match stale {
            Some(stale) => {
                debug!(%id, width = frame.size(), "relinked resized frame");
                Updated::Relinked(stale)
            }
            None => Updated::InPlace,
        };
        self.frames.insert(idx, frame);
        Ok(Some(updated))
    }

    fn position(&self, id: FrameId) -> Option<usize> {
        self.frames.iter().position(|f| f.id() == id)
    }
}
