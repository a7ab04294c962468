use clap::{Arg, Command};

use crate::common::with_input_args;

pub const DEPTH_CMD: &str = "depth";

pub fn create_depth_cli() -> Command {
    with_input_args(
        Command::new(DEPTH_CMD)
            .about("Approximate per-position read depth over a region of a BAM file (mosdepth fast mode)."),
    )
    .arg(
        Arg::new("flank-bp")
            .long("flank-bp")
            .required(false)
            .value_parser(clap::value_parser!(u64))
            .help("Bases added on each side of the region when querying (default: 0)"),
    )
    .arg(
        Arg::new("exclude-flags")
            .long("exclude-flags")
            .required(false)
            .value_parser(clap::value_parser!(u16))
            .help("Skip reads with any of these SAM flag bits set, e.g. 1796 (default: 0)"),
    )
}
