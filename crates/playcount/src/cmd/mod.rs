use clap::{Args, Subcommand};
use playcount_frame::{Frame, FrameId, MIN_COUNTER_WIDTH};

use crate::exit::{frame_error, CliError, CliResult};
use crate::output::{parse_hex, OutputFormat};

pub mod decode;
pub mod encode;
pub mod frame;
pub mod inc;
pub mod play;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a PCNT payload.
    Decode(DecodeArgs),
    /// Encode a play count into a PCNT payload.
    Encode(EncodeArgs),
    /// Increment a PCNT payload.
    Inc(IncArgs),
    /// Decode one serialized ID3v2 frame.
    Frame(FrameArgs),
    /// Record plays against a serialized tag frame area.
    Play(PlayArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Inc(args) => inc::run(args, format),
        Command::Frame(args) => frame::run(args, format),
        Command::Play(args) => play::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Counter payload as hex (e.g. 0000012c).
    pub payload: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Play count to store.
    pub value: u64,
    /// Width of the frame the count is written into.
    #[arg(long, default_value_t = MIN_COUNTER_WIDTH)]
    pub width: usize,
}

#[derive(Args, Debug)]
pub struct IncArgs {
    /// Counter payload as hex.
    pub payload: String,
    /// Number of increments to apply.
    #[arg(long, short = 'n', default_value = "1")]
    pub times: u64,
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Serialized frame (header and payload) as hex.
    pub bytes: String,
    /// Read the size field as a plain ID3v2.3 integer instead of synchsafe.
    #[arg(long)]
    pub id3v23: bool,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Serialized frame area of the tag as hex. Omit for an untagged track.
    #[arg(default_value = "")]
    pub frames: String,
    /// Number of plays to record.
    #[arg(long, short = 'n', default_value = "1")]
    pub plays: u64,
    /// Reset the play count after recording plays.
    #[arg(long)]
    pub reset: bool,
    /// Treat the frame area as ID3v2.3.
    #[arg(long)]
    pub id3v23: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a hex argument into a PCNT frame, enforcing the minimum width.
pub(crate) fn pcnt_from_hex(input: &str) -> CliResult<Frame> {
    let payload = parse_hex(input).map_err(CliError::data_invalid)?;
    if payload.len() < MIN_COUNTER_WIDTH {
        return Err(CliError::data_invalid(format!(
            "PCNT payload must be at least {MIN_COUNTER_WIDTH} bytes, got {}",
            payload.len()
        )));
    }
    Frame::new(FrameId::PCNT, 0, payload).map_err(|err| frame_error("payload", err))
}
