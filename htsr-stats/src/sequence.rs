//! Per-read sequence statistics: decoded sequences, k-mer counts and GC content.

use log::debug;

use htsr_core::models::RegionSpec;
use htsr_core::traits::AlignmentSource;
use htsr_core::utils::decode_nt16;
use htsr_core::Result;

use crate::models::{GcRow, KmerRow};

/// G+C count of a sequence and its share of the sequence length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcContent {
    pub count: usize,
    /// NaN when the sequence is empty.
    pub proportion: f64,
}

///
/// Decode nt16 codes into a base string. Every code maps to a character of
/// `=ACMGRSVTWYHKDBN`.
///
pub fn decode_sequence(codes: &[u8]) -> String {
    codes.iter().map(|&c| decode_nt16(c) as char).collect()
}

///
/// Count occurrences of `pattern` in `sequence`, scanning left to right and
/// resuming after the end of each match. Overlapping occurrences are therefore
/// counted once: `"AAAA"` contains `"AA"` twice, not three times.
///
/// An empty pattern never matches.
///
pub fn count_substring(sequence: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    sequence.matches(pattern).count()
}

///
/// Count C and G bases and their proportion of the sequence.
///
pub fn gc_content(sequence: &str) -> GcContent {
    let count = count_substring(sequence, "C") + count_substring(sequence, "G");
    let proportion = if sequence.is_empty() {
        f64::NAN
    } else {
        count as f64 / sequence.len() as f64
    };
    GcContent { count, proportion }
}

///
/// Decoded sequences of every read overlapping `region`, in stream order.
///
pub fn extract_sequences<S: AlignmentSource + ?Sized>(
    source: &mut S,
    region: &RegionSpec,
) -> Result<Vec<String>> {
    let mut sequences = Vec::new();
    for record in source.query(region)? {
        let record = record?;
        sequences.push(decode_sequence(&record.bases));
    }
    debug!("extracted {} sequences from {}", sequences.len(), region);
    Ok(sequences)
}

///
/// Count `kmer` in every read overlapping `region`.
///
/// # Arguments
/// - source: the alignment store to query
/// - region: the region of interest
/// - kmer: the substring to look for
///
pub fn count_kmer<S: AlignmentSource + ?Sized>(
    source: &mut S,
    region: &RegionSpec,
    kmer: &str,
) -> Result<Vec<KmerRow>> {
    let mut rows = Vec::new();
    for record in source.query(region)? {
        let record = record?;
        let sequence = decode_sequence(&record.bases);
        let count = count_substring(&sequence, kmer);
        rows.push(KmerRow { sequence, count });
    }
    debug!("counted '{}' in {} reads from {}", kmer, rows.len(), region);
    Ok(rows)
}

///
/// GC count and proportion of every read overlapping `region`.
///
pub fn gc_content_table<S: AlignmentSource + ?Sized>(
    source: &mut S,
    region: &RegionSpec,
) -> Result<Vec<GcRow>> {
    let mut rows = Vec::new();
    for record in source.query(region)? {
        let record = record?;
        let sequence = decode_sequence(&record.bases);
        let gc = gc_content(&sequence);
        rows.push(GcRow {
            sequence,
            gc_count: gc.count,
            gc_proportion: gc.proportion,
        });
    }
    Ok(rows)
}
