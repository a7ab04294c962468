use clap::{Command, arg};

use crate::common::with_input_args;

pub const GENOTYPES_CMD: &str = "genotypes";

pub fn create_genotypes_cli() -> Command {
    with_input_args(
        Command::new(GENOTYPES_CMD)
            .about("Build a haplotype-by-variant allele matrix for a region of a diploid VCF or BCF."),
    )
    .arg(
        arg!(--npy <NPY>)
            .required(false)
            .help("Also write the allele matrix as a NumPy .npy file"),
    )
}
