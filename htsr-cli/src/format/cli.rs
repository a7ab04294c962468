use clap::{Arg, Command};

pub const FORMAT_CMD: &str = "format";

pub fn create_format_cli() -> Command {
    Command::new(FORMAT_CMD)
        .about("Detect the format of a file from its magic bytes.")
        .arg(Arg::new("file").required(true).help("Path to the file to inspect"))
}
