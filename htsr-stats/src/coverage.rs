//! Approximate per-position read depth.
//!
//! This is the "fast mode" depth from mosdepth: every read contributes +1 at its
//! first mapped base and -1 one past its last mapped base, and a prefix sum over
//! the contig turns those deltas into depth. Reads are treated as solid intervals,
//! so deletions, skipped regions and mismatches inside a read are not accounted for.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use htsr_core::models::RegionSpec;
use htsr_core::traits::AlignmentSource;
use htsr_core::Result;

use crate::models::DepthTable;

///
/// Options for [depth].
///
/// The record sources in htsr return every record *overlapping* the query, so
/// reads starting before the window are already counted with `flank_bp = 0`.
/// For sources that only return records starting inside the query, set
/// `flank_bp` to at least the longest expected read or template length; depth
/// further than `flank_bp` from the flanked query edges is then exact, while
/// without a flank depth at the window edges is underestimated.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthOptions {
    /// Bases added on each side of the window when querying.
    pub flank_bp: u64,
    /// Records with any of these SAM flag bits set are skipped; 0 counts every record.
    pub exclude_flags: u16,
}

///
/// Sweep-line depth accumulator over a whole contig.
///
pub struct CoverageAccumulator {
    deltas: Vec<i32>,
    contig_length: u64,
}

impl CoverageAccumulator {
    ///
    /// Allocate a delta array for a contig of `contig_length` bases. One extra slot
    /// holds the decrement of reads ending at the last base.
    ///
    pub fn new(contig_length: u64) -> Self {
        CoverageAccumulator {
            deltas: vec![0; contig_length as usize + 1],
            contig_length,
        }
    }

    pub fn contig_length(&self) -> u64 {
        self.contig_length
    }

    ///
    /// Add an interval `[start, end)`. Ends past the contig are clamped, and empty
    /// or inverted intervals contribute nothing.
    ///
    pub fn add(&mut self, start: u64, end: u64) {
        let end = end.min(self.contig_length);
        if start >= end {
            return;
        }
        self.deltas[start as usize] += 1;
        self.deltas[end as usize] -= 1;
    }

    ///
    /// Prefix-sum the deltas over the whole contig and return depth for
    /// `[start, end)`.
    ///
    pub fn into_window(self, start: u64, end: u64) -> Vec<u32> {
        let end = end.min(self.contig_length) as usize;
        let start = (start as usize).min(end);

        let mut depth: i32 = 0;
        let mut window = Vec::with_capacity(end - start);
        for (position, delta) in self.deltas[..end].iter().enumerate() {
            depth += delta;
            if position >= start {
                window.push(depth.max(0) as u32);
            }
        }
        window
    }

    /// Depth at every position of the contig.
    pub fn into_depths(self) -> Vec<u32> {
        let length = self.contig_length;
        self.into_window(0, length)
    }
}

///
/// Estimate depth at every position of `region`.
///
/// The window end is clamped to the contig length. Returns one depth per
/// position in the (clamped) window.
///
pub fn depth<S: AlignmentSource + ?Sized>(
    source: &mut S,
    region: &RegionSpec,
    options: &DepthOptions,
) -> Result<DepthTable> {
    let contig_length = source.contig_length(region.contig())?;
    let tid = source.contig_id(region.contig())?;

    let window = region.clamp_end(contig_length);
    if window.end() < region.end() {
        warn!(
            "{} extends past the end of {} ({} bp); clamping to {}",
            region,
            region.contig(),
            contig_length,
            window
        );
    }

    let query = window.flanked(options.flank_bp, contig_length);
    debug!("depth over {} (tid {}) using query window {}", window, tid, query);

    let mut coverage = CoverageAccumulator::new(contig_length);
    let mut counted = 0usize;
    let mut skipped = 0usize;

    if !query.is_empty() {
        for record in source.query(&query)? {
            let record = record?;
            if record.flags & options.exclude_flags != 0 {
                skipped += 1;
                continue;
            }
            coverage.add(record.position, record.end_position);
            counted += 1;
        }
    }
    debug!("{} records counted, {} skipped by flag", counted, skipped);

    Ok(DepthTable {
        contig: window.contig().to_string(),
        start: window.start(),
        depths: coverage.into_window(window.start(), window.end()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use htsr_core::models::AlignmentRecord;
    use htsr_core::HtsrError;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::testing::MemoryAlignments;

    fn read(start: u64, end: u64) -> AlignmentRecord {
        AlignmentRecord::new(start, end, vec![])
    }

    #[rstest]
    fn test_two_overlapping_reads() {
        let mut source = MemoryAlignments::new("chr1", 100, vec![read(0, 10), read(5, 15)]);
        let region = RegionSpec::new("chr1", 0, 15).unwrap();

        let table = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        assert_eq!(
            table.depths,
            vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1]
        );
        assert_eq!(table.start, 0);
        assert_eq!(table.contig, "chr1");
    }

    #[rstest]
    fn test_single_read() {
        let mut source = MemoryAlignments::new("chr1", 1000, vec![read(100, 150)]);
        let region = RegionSpec::new("chr1", 50, 200).unwrap();

        let table = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        assert_eq!(table.len(), 150);
        for row in table.rows() {
            let expected = if (100..150).contains(&row.position) { 1 } else { 0 };
            assert_eq!(row.depth, expected, "position {}", row.position);
        }
    }

    #[rstest]
    fn test_sweep_line_matches_brute_force() {
        let reads = vec![
            read(3, 40),
            read(10, 12),
            read(10, 60),
            read(25, 26),
            read(39, 80),
            read(79, 100),
        ];
        let mut source = MemoryAlignments::new("chr1", 100, reads.clone());
        let region = RegionSpec::new("chr1", 0, 100).unwrap();

        let table = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        for row in table.rows() {
            let expected = reads
                .iter()
                .filter(|r| r.position <= row.position && row.position < r.end_position)
                .count() as u32;
            assert_eq!(row.depth, expected, "position {}", row.position);
        }
    }

    #[rstest]
    fn test_reads_starting_before_window_are_counted() {
        let mut source = MemoryAlignments::new("chr1", 100, vec![read(0, 30), read(20, 25)]);
        let region = RegionSpec::new("chr1", 20, 30).unwrap();

        let table = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        assert_eq!(table.depths, vec![2, 2, 2, 2, 2, 1, 1, 1, 1, 1]);
    }

    #[rstest]
    fn test_flank_widens_the_query() {
        let mut source = MemoryAlignments::new("chr1", 100, vec![read(0, 30)]);
        let region = RegionSpec::new("chr1", 20, 30).unwrap();
        let options = DepthOptions {
            flank_bp: 15,
            ..Default::default()
        };

        let table = depth(&mut source, &region, &options).unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(source.queries, vec![RegionSpec::new("chr1", 5, 45).unwrap()]);
    }

    #[rstest]
    fn test_window_is_clamped_to_contig() {
        let mut source = MemoryAlignments::new("chr1", 50, vec![read(40, 60)]);
        let region = RegionSpec::new("chr1", 45, 70).unwrap();

        let table = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        assert_eq!(table.depths, vec![1, 1, 1, 1, 1]);
    }

    #[rstest]
    fn test_read_ending_at_contig_end() {
        let mut source = MemoryAlignments::new("chr1", 10, vec![read(5, 10)]);
        let region = RegionSpec::new("chr1", 0, 10).unwrap();

        let table = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        assert_eq!(table.depths, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
    }

    #[rstest]
    fn test_exclude_flags() {
        let mut source = MemoryAlignments::new(
            "chr1",
            20,
            vec![read(0, 5), read(0, 5).with_flags(0x400)],
        );
        let region = RegionSpec::new("chr1", 0, 5).unwrap();

        let all = depth(&mut source, &region, &DepthOptions::default()).unwrap();
        assert_eq!(all.depths, vec![2; 5]);

        let options = DepthOptions {
            exclude_flags: 1796,
            ..Default::default()
        };
        let filtered = depth(&mut source, &region, &options).unwrap();
        assert_eq!(filtered.depths, vec![1; 5]);
    }

    #[rstest]
    fn test_unknown_contig() {
        let mut source = MemoryAlignments::new("chr1", 20, vec![]);
        let region = RegionSpec::new("chrUn", 0, 5).unwrap();
        let result = depth(&mut source, &region, &DepthOptions::default());
        assert!(matches!(result, Err(HtsrError::NotFound(_))));
    }

    #[rstest]
    fn test_stream_failure_returns_no_table() {
        let mut source = MemoryAlignments::new("chr1", 100, vec![read(0, 10), read(5, 15)]);
        source.fail_after = Some(1);
        let region = RegionSpec::new("chr1", 0, 15).unwrap();
        let result = depth(&mut source, &region, &DepthOptions::default());
        assert!(matches!(result, Err(HtsrError::Io(_))));
    }

    #[rstest]
    fn test_accumulator_ignores_empty_intervals() {
        let mut coverage = CoverageAccumulator::new(5);
        coverage.add(2, 2);
        coverage.add(4, 1);
        coverage.add(1, 3);
        assert_eq!(coverage.into_depths(), vec![0, 1, 1, 0, 0]);
    }
}
