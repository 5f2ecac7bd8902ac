//! ID3v2 play counter codec and tracker.
//!
//! # Crate Structure
//!
//! - [`frame`]: PCNT frame codec, bitwise incrementer, and tag frame list
//! - [`tracker`]: play count tracking over host tag storage (behind `tracker` feature)

/// Re-export frame types.
pub mod frame {
    pub use playcount_frame::*;
}

/// Re-export tracker types (requires `tracker` feature).
#[cfg(feature = "tracker")]
pub mod tracker {
    pub use playcount_tracker::*;
}
