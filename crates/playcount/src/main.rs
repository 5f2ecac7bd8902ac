mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "playcount", version, about = "ID3v2 play counter tool")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "PLAYCOUNT_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inc_subcommand() {
        let cli = Cli::try_parse_from(["playcount", "inc", "000000ff", "--times", "3"])
            .expect("inc args should parse");

        match cli.command {
            Command::Inc(args) => {
                assert_eq!(args.payload, "000000ff");
                assert_eq!(args.times, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn encode_width_defaults_to_minimum() {
        let cli = Cli::try_parse_from(["playcount", "encode", "5000000000"])
            .expect("encode args should parse");
        assert!(matches!(cli.command, Command::Encode(args) if args.width == 4));
    }

    #[test]
    fn rejects_negative_count() {
        let err = Cli::try_parse_from(["playcount", "encode", "--", "-1"])
            .expect_err("negative counts should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn play_frames_are_optional() {
        let cli = Cli::try_parse_from(["playcount", "play", "-n", "2", "--format", "json"])
            .expect("play args should parse");
        assert!(matches!(
            cli.command,
            Command::Play(args) if args.frames.is_empty() && args.plays == 2
        ));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}
