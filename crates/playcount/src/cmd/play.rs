use playcount_frame::Version;
use playcount_tracker::{MemoryTagIo, PlayCountTracker, TagIo, TagKind, TrackRef, TrackerConfig};
use serde::Serialize;

use crate::cmd::PlayArgs;
use crate::exit::{tracker_error, CliError, CliResult, SUCCESS};
use crate::output::{count_text, parse_hex, print_report, to_hex, OutputFormat, Report};

const TRACK_URI: &str = "cli://track";

#[derive(Serialize)]
struct PlayReport {
    plays: u64,
    reset: bool,
    count: Option<u64>,
    frame_count: usize,
    frames: String,
}

impl Report for PlayReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("plays", self.plays.to_string()),
            ("reset", self.reset.to_string()),
            ("count", count_text(self.count)),
            ("frame_count", self.frame_count.to_string()),
            ("frames", self.frames.clone()),
        ]
    }

    fn raw(&self) -> String {
        self.frames.clone()
    }
}

pub fn run(args: PlayArgs, format: OutputFormat) -> CliResult<i32> {
    let frames = parse_hex(&args.frames).map_err(CliError::data_invalid)?;
    let version = if args.id3v23 {
        Version::Id3v23
    } else {
        Version::Id3v24
    };

    let mut io = MemoryTagIo::new();
    let kind = if frames.is_empty() {
        TagKind::Untagged
    } else {
        io.insert_raw(TRACK_URI, version, frames);
        TagKind::Id3v2
    };
    let track = TrackRef::new(TRACK_URI, kind);

    let config = TrackerConfig {
        version,
        ..TrackerConfig::default()
    };
    let mut tracker = PlayCountTracker::with_config(io, config);

    for _ in 0..args.plays {
        tracker
            .record_play(&track)
            .map_err(|err| tracker_error("play", err))?;
    }
    if args.reset {
        tracker
            .reset(&track)
            .map_err(|err| tracker_error("reset", err))?;
    }

    let count = tracker
        .play_count(&track)
        .map_err(|err| tracker_error("play", err))?;
    let frame_count = tracker
        .get_ref()
        .read_tag(&track)
        .map_err(|err| tracker_error("play", err))?
        .map_or(0, |tag| tag.len());

    let report = PlayReport {
        plays: args.plays,
        reset: args.reset,
        count: count.and_then(|c| c.value()),
        frame_count,
        frames: tracker.get_ref().raw(TRACK_URI).map(to_hex).unwrap_or_default(),
    };
    print_report(&report, format);
    Ok(SUCCESS)
}
