use anyhow::{Context, Result};
use clap::ArgMatches;

use htsr_stats::{DepthRow, depth};

use crate::common::{get_output_format, get_region, open_alignments};
use crate::config::HtsrConfig;
use crate::output::{open_output, write_rows};

pub fn run_depth(matches: &ArgMatches, config: &HtsrConfig) -> Result<()> {
    let region = get_region(matches)?;

    let mut options = config.depth;
    if let Some(flank_bp) = matches.get_one::<u64>("flank-bp") {
        options.flank_bp = *flank_bp;
    }
    if let Some(exclude_flags) = matches.get_one::<u16>("exclude-flags") {
        options.exclude_flags = *exclude_flags;
    }

    let mut store = open_alignments(matches)?;
    let table = depth(&mut store, &region, &options)
        .with_context(|| format!("Failed to compute depth over {}", region))?;
    let rows: Vec<DepthRow> = table.rows().collect();

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_rows(&rows, get_output_format(matches, config)?, &mut out)
}
