use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("playcount {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: playcount");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("PLAYCOUNT_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "counter: min_width={} native_width={}",
        playcount_frame::MIN_COUNTER_WIDTH,
        playcount_frame::MAX_NATIVE_WIDTH
    );
    println!(
        "features: tracker={}, cli=true",
        cfg!(feature = "tracker")
    );

    Ok(SUCCESS)
}
