use bytes::BytesMut;
use playcount_frame::{decode_frame, get_count, Count, Frame, Version, WireConfig};
use serde::Serialize;

use crate::cmd::FrameArgs;
use crate::exit::{frame_error, CliError, CliResult, SUCCESS};
use crate::output::{count_text, parse_hex, print_report, to_hex, OutputFormat, Report};

#[derive(Serialize)]
struct FrameReport {
    id: String,
    version: u8,
    flags: u16,
    size: usize,
    payload: String,
    /// Only present for PCNT frames that fit in a `u64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    /// Set for PCNT frames wider than a `u64`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    unrepresentable: bool,
    trailing_bytes: usize,
}

impl FrameReport {
    fn new(frame: &Frame, version: Version, trailing_bytes: usize) -> Self {
        let count = frame.is_pcnt().then(|| get_count(frame));
        Self {
            id: frame.id().to_string(),
            version: version.major(),
            flags: frame.flags(),
            size: frame.size(),
            payload: to_hex(frame.data()),
            count: count.and_then(Count::value),
            unrepresentable: count == Some(Count::Unrepresentable),
            trailing_bytes,
        }
    }
}

impl Report for FrameReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("id", self.id.clone()),
            ("version", format!("2.{}", self.version)),
            ("flags", format!("{:#06x}", self.flags)),
            ("size", self.size.to_string()),
            ("payload", self.payload.clone()),
        ];
        if self.count.is_some() || self.unrepresentable {
            rows.push(("count", count_text(self.count)));
        }
        if self.trailing_bytes > 0 {
            rows.push(("trailing", self.trailing_bytes.to_string()));
        }
        rows
    }

    fn raw(&self) -> String {
        self.payload.clone()
    }
}

pub fn run(args: FrameArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex(&args.bytes).map_err(CliError::data_invalid)?;
    let config = WireConfig {
        version: if args.id3v23 {
            Version::Id3v23
        } else {
            Version::Id3v24
        },
        ..WireConfig::default()
    };

    let mut src = BytesMut::from(bytes.as_slice());
    let frame = decode_frame(&mut src, &config)
        .map_err(|err| frame_error("frame", err))?
        .ok_or_else(|| CliError::data_invalid("frame: incomplete frame"))?;

    if !src.is_empty() {
        tracing::warn!(trailing = src.len(), "bytes left after frame");
    }

    print_report(&FrameReport::new(&frame, config.version, src.len()), format);
    Ok(SUCCESS)
}
