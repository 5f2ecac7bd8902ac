use playcount_frame::{
    get_count, increment, set_count, Count, Frame, FrameId, Tag, Updated, Version,
};
use tracing::{debug, info, warn};

use crate::error::{Result, TrackerError};
use crate::io::TagIo;
use crate::track::{TrackProvider, TrackRef};

/// Controls how the tracker treats tracks and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Version given to tags the tracker creates.
    pub version: Version,
    /// When true, recording a play on a track without a tag creates one.
    pub create_missing: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            version: Version::Id3v24,
            create_missing: true,
        }
    }
}

/// Add one play to `tag`, creating its PCNT frame at the tail if needed.
pub fn record_play_in(tag: &mut Tag) -> playcount_frame::Result<Count> {
    let mut count = Count::Value(1);
    let updated = tag.update(FrameId::PCNT, |frame| {
        let update = increment(frame)?;
        count = get_count(update.frame());
        Ok(update)
    })?;

    if updated.is_none() {
        debug!("no PCNT frame, appending one");
        tag.append(increment(Frame::pcnt()?)?.into_frame());
    }
    Ok(count)
}

/// Set the PCNT frame in `tag` back to zero. `None` if there is no PCNT frame.
pub fn reset_in(tag: &mut Tag) -> playcount_frame::Result<Option<Count>> {
    let updated = tag.update(FrameId::PCNT, |frame| set_count(frame, 0))?;
    if let Some(Updated::Relinked(stale)) = &updated {
        debug!(width = stale.size(), "shrank play counter on reset");
    }
    Ok(updated.map(|_| Count::Value(0)))
}

/// The play count stored in `tag`, if it has a PCNT frame.
pub fn play_count_in(tag: &Tag) -> Option<Count> {
    tag.find(FrameId::PCNT).map(get_count)
}

/// Records plays and resets counts through host tag storage.
pub struct PlayCountTracker<T> {
    io: T,
    config: TrackerConfig,
}

impl<T: TagIo> PlayCountTracker<T> {
    /// Create a tracker with default configuration.
    pub fn new(io: T) -> Self {
        Self::with_config(io, TrackerConfig::default())
    }

    /// Create a tracker with explicit configuration.
    pub fn with_config(io: T, config: TrackerConfig) -> Self {
        Self { io, config }
    }

    /// Increment the play count of a finished track and persist it.
    pub fn record_play(&mut self, track: &TrackRef) -> Result<Count> {
        ensure_supported(track)?;

        let mut tag = match self.io.read_tag(track)? {
            Some(tag) => tag,
            None if self.config.create_missing => {
                debug!(uri = %track.uri, "creating tag");
                Tag::new(self.config.version)
            }
            None => return Err(TrackerError::MissingTag(track.uri.clone())),
        };

        let count = record_play_in(&mut tag)?;
        self.io.write_tag(track, &tag)?;

        info!(uri = %track.uri, %count, "recorded play");
        Ok(count)
    }

    /// Reset a track's play count to zero. `None` when it has no count.
    pub fn reset(&mut self, track: &TrackRef) -> Result<Option<Count>> {
        ensure_supported(track)?;

        let Some(mut tag) = self.io.read_tag(track)? else {
            return Ok(None);
        };
        let Some(count) = reset_in(&mut tag)? else {
            debug!(uri = %track.uri, "no play count to reset");
            return Ok(None);
        };

        self.io.write_tag(track, &tag)?;
        info!(uri = %track.uri, "reset play count");
        Ok(Some(count))
    }

    /// Read a track's play count without modifying it.
    pub fn play_count(&self, track: &TrackRef) -> Result<Option<Count>> {
        ensure_supported(track)?;
        Ok(self
            .io
            .read_tag(track)?
            .as_ref()
            .and_then(play_count_in))
    }

    /// Drop the PCNT frame from a track's tag. Returns true if one was removed.
    pub fn forget(&mut self, track: &TrackRef) -> Result<bool> {
        ensure_supported(track)?;

        let Some(mut tag) = self.io.read_tag(track)? else {
            return Ok(false);
        };
        if tag.remove(FrameId::PCNT).is_none() {
            return Ok(false);
        }

        self.io.write_tag(track, &tag)?;
        info!(uri = %track.uri, "removed play count");
        Ok(true)
    }

    /// Handle a "track finished" event for the provider's current track.
    ///
    /// Tracks without ID3v2 support are skipped rather than reported.
    pub fn on_track_finished<P: TrackProvider>(&mut self, tracks: &P) -> Result<Option<Count>> {
        let Some(track) = tracks.current() else {
            return Ok(None);
        };
        if !track.tag_kind.supports_pcnt() {
            debug!(uri = %track.uri, "skipping track without ID3v2 tag");
            return Ok(None);
        }
        self.record_play(&track).map(Some)
    }

    /// Handle the "reset play count" action for the provider's current track.
    pub fn on_reset_action<P: TrackProvider>(&mut self, tracks: &P) -> Result<Option<Count>> {
        match tracks.current() {
            Some(track) => self.reset(&track),
            None => Ok(None),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Borrow the tag provider.
    pub fn get_ref(&self) -> &T {
        &self.io
    }

    /// Mutably borrow the tag provider.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.io
    }

    /// Consume the tracker and return the tag provider.
    pub fn into_inner(self) -> T {
        self.io
    }
}

fn ensure_supported(track: &TrackRef) -> Result<()> {
    if track.tag_kind.supports_pcnt() {
        Ok(())
    } else {
        warn!(uri = %track.uri, "track does not use ID3v2 tags");
        Err(TrackerError::UnsupportedTag(track.uri.clone()))
    }
}
