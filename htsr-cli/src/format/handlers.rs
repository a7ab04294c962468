use anyhow::{Context, Result};
use clap::ArgMatches;

use htsr_io::detect_format;

pub fn run_format(matches: &ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<String>("file")
        .expect("A path to a file is required.");

    let format = detect_format(file).with_context(|| format!("Can't read {}", file))?;
    println!("{}", format);

    Ok(())
}
