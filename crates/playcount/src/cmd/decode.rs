use crate::cmd::{pcnt_from_hex, DecodeArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_report, CounterReport, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = pcnt_from_hex(&args.payload)?;
    print_report(&CounterReport::new(&frame, false), format);
    Ok(SUCCESS)
}
