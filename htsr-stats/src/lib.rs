//! # htsr-stats
//!
//! Region-scoped analytics over any [AlignmentSource](htsr_core::traits::AlignmentSource)
//! or [VariantSource](htsr_core::traits::VariantSource): per-read k-mer and GC counts,
//! approximate depth, numeric INFO fields and diploid genotype matrices.
//!
//! Every operation consumes one region query to exhaustion and returns an owned
//! table, or the first error it hits.
//!
//! ```rust,ignore
//! use htsr_core::models::RegionSpec;
//! use htsr_stats::{depth, DepthOptions};
//!
//! let region = RegionSpec::parse("chr1:10001-10100")?;
//! let table = depth(&mut store, &region, &DepthOptions::default())?;
//! ```
pub mod coverage;
pub mod genotypes;
pub mod info;
pub mod models;
pub mod sequence;

#[cfg(test)]
mod testing;

pub use coverage::{CoverageAccumulator, DepthOptions, depth};
pub use genotypes::{GenotypeMatrix, extract_genotypes};
pub use info::{InfoOptions, MissingFieldPolicy, extract_info};
pub use models::{DepthRow, DepthTable, GcRow, InfoRow, InfoScalar, InfoTable, KmerRow, VariantSite};
pub use sequence::{
    GcContent, count_kmer, count_substring, decode_sequence, extract_sequences, gc_content,
    gc_content_table,
};
