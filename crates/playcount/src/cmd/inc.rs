use playcount_frame::increment;

use crate::cmd::{pcnt_from_hex, IncArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_report, CounterReport, OutputFormat};

pub fn run(args: IncArgs, format: OutputFormat) -> CliResult<i32> {
    let mut frame = pcnt_from_hex(&args.payload)?;
    let mut resized = false;

    for step in 0..args.times {
        let update = increment(frame).map_err(|err| frame_error("inc", err.into()))?;
        if update.is_replaced() {
            tracing::debug!(step, width = update.frame().size(), "counter widened");
            resized = true;
        }
        frame = update.into_frame();
    }

    print_report(&CounterReport::new(&frame, resized), format);
    Ok(SUCCESS)
}
