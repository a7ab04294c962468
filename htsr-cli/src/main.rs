mod common;
mod config;
mod depth;
mod format;
mod genotypes;
mod info;
mod output;
mod reads;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, arg};

use config::HtsrConfig;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "htsr";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Region-scoped analytics over indexed BAM, VCF and BCF files.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more: -v for info, -vv for debug"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .global(true)
                .help("Path to an htsr.toml config file"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .global(true)
                .help("Write results to this file instead of stdout"),
        )
        .arg(
            Arg::new("output-format")
                .long("output-format")
                .required(false)
                .global(true)
                .value_parser(["tsv", "json"])
                .help("Table format (default: tsv)"),
        )
        .subcommand(format::cli::create_format_cli())
        .subcommand(reads::cli::create_sequences_cli())
        .subcommand(reads::cli::create_kmer_cli())
        .subcommand(reads::cli::create_gc_cli())
        .subcommand(depth::cli::create_depth_cli())
        .subcommand(info::cli::create_info_cli())
        .subcommand(genotypes::cli::create_genotypes_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    let config = match matches.get_one::<String>("config") {
        Some(path) => HtsrConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => HtsrConfig::default(),
    };

    match matches.subcommand() {
        //
        // FORMAT DETECTION
        //
        Some((format::cli::FORMAT_CMD, matches)) => {
            format::handlers::run_format(matches)?;
        }

        //
        // READ SEQUENCES, K-MERS AND GC
        //
        Some((reads::cli::SEQUENCES_CMD, matches)) => {
            reads::handlers::run_sequences(matches, &config)?;
        }
        Some((reads::cli::KMER_CMD, matches)) => {
            reads::handlers::run_kmer(matches, &config)?;
        }
        Some((reads::cli::GC_CMD, matches)) => {
            reads::handlers::run_gc(matches, &config)?;
        }

        //
        // DEPTH
        //
        Some((depth::cli::DEPTH_CMD, matches)) => {
            depth::handlers::run_depth(matches, &config)?;
        }

        //
        // INFO FIELDS
        //
        Some((info::cli::INFO_CMD, matches)) => {
            info::handlers::run_info(matches, &config)?;
        }

        //
        // GENOTYPE MATRIX
        //
        Some((genotypes::cli::GENOTYPES_CMD, matches)) => {
            genotypes::handlers::run_genotypes(matches, &config)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_parser_is_well_formed() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_depth_arguments() {
        let matches = build_parser()
            .try_get_matches_from([
                "htsr",
                "-vv",
                "depth",
                "reads.bam",
                "--region",
                "chr1:1-100",
                "--flank-bp",
                "300",
                "--output-format",
                "json",
            ])
            .unwrap();

        assert_eq!(matches.get_count("verbose"), 2);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, depth::cli::DEPTH_CMD);
        assert_eq!(sub.get_one::<u64>("flank-bp"), Some(&300));
        assert_eq!(sub.get_one::<String>("output-format").map(String::as_str), Some("json"));
    }

    #[rstest]
    fn test_region_is_required() {
        let result = build_parser().try_get_matches_from(["htsr", "gc", "reads.bam"]);
        assert!(result.is_err());
    }
}
