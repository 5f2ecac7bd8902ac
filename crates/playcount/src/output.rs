use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use playcount_frame::{get_count, Count, Frame};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Command output that renders in every [`OutputFormat`].
pub trait Report: Serialize {
    /// Field/value pairs for table and pretty output.
    fn rows(&self) -> Vec<(&'static str, String)>;

    /// The single value printed in raw mode.
    fn raw(&self) -> String;
}

/// A PCNT counter after a command ran on it.
#[derive(Serialize)]
pub struct CounterReport {
    pub width: usize,
    /// `None` when the counter is wider than 64 bits.
    pub count: Option<u64>,
    pub payload: String,
    pub resized: bool,
}

impl CounterReport {
    pub fn new(frame: &Frame, resized: bool) -> Self {
        Self {
            width: frame.size(),
            count: get_count(frame).value(),
            payload: to_hex(frame.data()),
            resized,
        }
    }
}

impl Report for CounterReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("width", self.width.to_string()),
            ("count", count_text(self.count)),
            ("payload", self.payload.clone()),
            ("resized", self.resized.to_string()),
        ]
    }

    fn raw(&self) -> String {
        self.payload.clone()
    }
}

pub fn print_report<R: Report>(report: &R, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (field, value) in report.rows() {
                table.add_row(vec![field.to_string(), value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = report
                .rows()
                .into_iter()
                .map(|(field, value)| format!("{field}={value}"))
                .collect();
            println!("{}", line.join(" "));
        }
        OutputFormat::Raw => {
            let mut out = std::io::stdout();
            let _ = writeln!(out, "{}", report.raw());
            let _ = out.flush();
        }
    }
}

pub fn count_text(count: Option<u64>) -> String {
    match count {
        Some(v) => v.to_string(),
        None => Count::Unrepresentable.to_string(),
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse hex bytes, allowing a `0x` prefix and space, `:` or `-` separators.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = trimmed
        .bytes()
        .filter(|b| !matches!(b, b' ' | b':' | b'-' | b'_'))
        .collect();

    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in {input:?}"));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_digit(pair[0]);
            let lo = hex_digit(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(format!("invalid hex digit in {input:?}")),
            }
        })
        .collect()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
