use playcount_frame::{set_count, Frame};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_report, CounterReport, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = Frame::pcnt_with_width(args.width).map_err(|err| frame_error("encode", err))?;
    let update = set_count(frame, args.value).map_err(|err| frame_error("encode", err.into()))?;

    print_report(&CounterReport::new(update.frame(), update.is_replaced()), format);
    Ok(SUCCESS)
}
