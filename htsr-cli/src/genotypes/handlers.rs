use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use ndarray_npy::write_npy;

use htsr_stats::extract_genotypes;

use crate::common::{get_output_format, get_region, open_variants};
use crate::config::HtsrConfig;
use crate::output::{open_output, write_genotypes};

pub fn run_genotypes(matches: &ArgMatches, config: &HtsrConfig) -> Result<()> {
    let region = get_region(matches)?;
    let mut store = open_variants(matches)?;

    let matrix = extract_genotypes(&mut store, &region)
        .with_context(|| format!("Failed to build genotype matrix for {}", region))?;
    let (rows, cols) = matrix.shape();
    info!("genotype matrix is {} haplotypes x {} variants", rows, cols);

    if let Some(npy) = matches.get_one::<String>("npy") {
        write_npy(npy, &matrix.alleles).with_context(|| format!("Failed to write {}", npy))?;
    }

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_genotypes(&matrix, get_output_format(matches, config)?, &mut out)
}
