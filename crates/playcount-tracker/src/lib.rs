//! Play count tracking over host-provided tag storage.
//!
//! This is the layer a media player plugin talks to. The host supplies the
//! current track through [`TrackProvider`] and tag storage through [`TagIo`];
//! [`PlayCountTracker`] turns "track finished" into an incremented PCNT frame
//! and "reset play count" into a zeroed one.

pub mod error;
pub mod io;
pub mod track;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use io::{MemoryTagIo, TagIo};
pub use track::{TagKind, TrackProvider, TrackRef};
pub use tracker::{play_count_in, record_play_in, reset_in, PlayCountTracker, TrackerConfig};
