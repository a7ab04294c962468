use clap::{Command, arg};

use crate::common::with_input_args;

pub const SEQUENCES_CMD: &str = "sequences";
pub const KMER_CMD: &str = "kmer";
pub const GC_CMD: &str = "gc";

pub fn create_sequences_cli() -> Command {
    with_input_args(
        Command::new(SEQUENCES_CMD)
            .about("Print the sequence of every read overlapping a region of a BAM file."),
    )
}

pub fn create_kmer_cli() -> Command {
    with_input_args(
        Command::new(KMER_CMD)
            .about("Count a k-mer in every read overlapping a region of a BAM file."),
    )
    .arg(
        arg!(--kmer <KMER>)
            .required(true)
            .help("The substring to count, e.g. ACGT"),
    )
}

pub fn create_gc_cli() -> Command {
    with_input_args(
        Command::new(GC_CMD)
            .about("GC count and proportion of every read overlapping a region of a BAM file."),
    )
}
