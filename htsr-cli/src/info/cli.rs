use clap::{Arg, Command, arg};

use crate::common::with_input_args;

pub const INFO_CMD: &str = "info";

pub fn create_info_cli() -> Command {
    with_input_args(
        Command::new(INFO_CMD)
            .about("Extract a single-valued numeric INFO field from every variant in a region."),
    )
    .arg(
        arg!(--tag <TAG>)
            .required(true)
            .help("The INFO key, e.g. DP"),
    )
    .arg(
        Arg::new("on-missing")
            .long("on-missing")
            .required(false)
            .value_parser(["fail", "null"])
            .help("What to do when a variant lacks the tag (default: fail)"),
    )
    .arg(
        Arg::new("expect")
            .long("expect")
            .required(false)
            .value_parser(["integer", "float"])
            .help("Value type every record must have (default: the header's declared type)"),
    )
}
