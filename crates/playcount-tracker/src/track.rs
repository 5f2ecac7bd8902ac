//! Track identity as supplied by the host player.

/// Tag format carried by a track, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// An ID3v2 tag is present.
    Id3v2,
    /// No tag yet; an ID3v2 tag may be created.
    Untagged,
    /// Some other format (ID3v1-only, APEv2, Vorbis comments, ...).
    Other,
}

impl TagKind {
    /// Returns true if PCNT handling applies to this tag format.
    pub fn supports_pcnt(self) -> bool {
        !matches!(self, TagKind::Other)
    }
}

/// A host track handle: its location plus the tag format it uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackRef {
    pub uri: String,
    pub tag_kind: TagKind,
}

impl TrackRef {
    pub fn new(uri: impl Into<String>, tag_kind: TagKind) -> Self {
        Self {
            uri: uri.into(),
            tag_kind,
        }
    }

    /// Shorthand for a track with an ID3v2 tag.
    pub fn id3v2(uri: impl Into<String>) -> Self {
        Self::new(uri, TagKind::Id3v2)
    }
}

/// Supplies the track an event or menu action refers to.
pub trait TrackProvider {
    /// The track the host is currently acting on, if any.
    fn current(&self) -> Option<TrackRef>;
}

impl TrackProvider for Option<TrackRef> {
    fn current(&self) -> Option<TrackRef> {
        self.clone()
    }
}
