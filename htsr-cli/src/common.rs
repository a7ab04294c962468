//! Arguments and helpers shared by the region-query subcommands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgMatches, Command, arg};

use htsr_core::models::RegionSpec;
use htsr_io::{AlignmentStore, IndexKind, VariantStore};

use crate::config::{HtsrConfig, OutputFormat};

///
/// Add the input file, region and index arguments to a subcommand.
///
pub fn with_input_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("file").required(true).help("Path to the indexed input file"))
        .arg(
            arg!(--region <REGION>)
                .required(true)
                .help("Region of interest, 1-based inclusive: chr1:10001-10100"),
        )
        .arg(
            arg!(--index <INDEX>)
                .required(false)
                .help("Path to the index (default: next to the input file)"),
        )
        .arg(
            Arg::new("index-kind")
                .long("index-kind")
                .required(false)
                .value_parser(["bai", "csi", "tbi"])
                .help("Index format (default: detected from the index file)"),
        )
}

pub fn get_region(matches: &ArgMatches) -> Result<RegionSpec> {
    let region = matches
        .get_one::<String>("region")
        .expect("--region is required");
    RegionSpec::parse(region).with_context(|| format!("Invalid region '{}'", region))
}

fn get_index(matches: &ArgMatches) -> (Option<&Path>, Option<IndexKind>) {
    let index_path = matches.get_one::<String>("index").map(Path::new);
    let index_kind = matches
        .get_one::<String>("index-kind")
        .map(|kind| match kind.as_str() {
            "bai" => IndexKind::Bai,
            "csi" => IndexKind::Csi,
            _ => IndexKind::Tabix,
        });
    (index_path, index_kind)
}

pub fn open_alignments(matches: &ArgMatches) -> Result<AlignmentStore> {
    let file = matches.get_one::<String>("file").expect("file is required");
    let (index_path, index_kind) = get_index(matches);
    AlignmentStore::open(file, index_path, index_kind)
        .with_context(|| format!("Failed to open alignments {}", file))
}

pub fn open_variants(matches: &ArgMatches) -> Result<VariantStore> {
    let file = matches.get_one::<String>("file").expect("file is required");
    let (index_path, index_kind) = get_index(matches);
    VariantStore::open(file, index_path, index_kind)
        .with_context(|| format!("Failed to open variants {}", file))
}

///
/// Output format from `--output-format`, falling back to the config file.
///
pub fn get_output_format(matches: &ArgMatches, config: &HtsrConfig) -> Result<OutputFormat> {
    match matches.get_one::<String>("output-format") {
        Some(name) => match OutputFormat::from_name(name) {
            Some(format) => Ok(format),
            None => bail!("Unknown output format '{}'", name),
        },
        None => Ok(config.output.format),
    }
}
