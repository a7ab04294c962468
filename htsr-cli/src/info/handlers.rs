use anyhow::{Context, Result};
use clap::ArgMatches;

use htsr_core::InfoKind;
use htsr_stats::{MissingFieldPolicy, extract_info};

use crate::common::{get_output_format, get_region, open_variants};
use crate::config::HtsrConfig;
use crate::output::{open_output, write_rows};

pub fn run_info(matches: &ArgMatches, config: &HtsrConfig) -> Result<()> {
    let region = get_region(matches)?;
    let tag = matches
        .get_one::<String>("tag")
        .expect("--tag is required");

    let mut options = config.info;
    match matches.get_one::<String>("on-missing").map(String::as_str) {
        Some("null") => options.on_missing = MissingFieldPolicy::Null,
        Some(_) => options.on_missing = MissingFieldPolicy::Fail,
        None => {}
    }
    options.expected = match matches.get_one::<String>("expect").map(String::as_str) {
        Some("integer") => Some(InfoKind::Integer),
        Some(_) => Some(InfoKind::Float),
        None => None,
    };

    let mut store = open_variants(matches)?;
    let table = extract_info(&mut store, &region, tag, &options)
        .with_context(|| format!("Failed to extract INFO/{} in {}", tag, region))?;

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_rows(&table.rows, get_output_format(matches, config)?, &mut out)
}
