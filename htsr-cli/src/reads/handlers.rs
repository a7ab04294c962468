use anyhow::{Context, Result};
use clap::ArgMatches;

use htsr_stats::{count_kmer, extract_sequences, gc_content_table};

use crate::common::{get_output_format, get_region, open_alignments};
use crate::config::HtsrConfig;
use crate::output::{SequenceRow, open_output, write_rows};

pub fn run_sequences(matches: &ArgMatches, config: &HtsrConfig) -> Result<()> {
    let region = get_region(matches)?;
    let mut store = open_alignments(matches)?;

    let rows: Vec<SequenceRow> = extract_sequences(&mut store, &region)
        .with_context(|| format!("Failed to read sequences in {}", region))?
        .into_iter()
        .map(|sequence| SequenceRow { sequence })
        .collect();

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_rows(&rows, get_output_format(matches, config)?, &mut out)
}

pub fn run_kmer(matches: &ArgMatches, config: &HtsrConfig) -> Result<()> {
    let region = get_region(matches)?;
    let kmer = matches
        .get_one::<String>("kmer")
        .expect("--kmer is required");
    let mut store = open_alignments(matches)?;

    let rows = count_kmer(&mut store, &region, kmer)
        .with_context(|| format!("Failed to count '{}' in {}", kmer, region))?;

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_rows(&rows, get_output_format(matches, config)?, &mut out)
}

pub fn run_gc(matches: &ArgMatches, config: &HtsrConfig) -> Result<()> {
    let region = get_region(matches)?;
    let mut store = open_alignments(matches)?;

    let rows = gc_content_table(&mut store, &region)
        .with_context(|| format!("Failed to compute GC content in {}", region))?;

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_rows(&rows, get_output_format(matches, config)?, &mut out)
}
