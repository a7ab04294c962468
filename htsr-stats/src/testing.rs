//! In-memory record sources for unit tests.

use std::collections::HashMap;

use htsr_core::models::{AlignmentRecord, RegionSpec, VariantFields, VariantRecord};
use htsr_core::traits::{AlignmentSource, RecordStream, VariantSource};
use htsr_core::{HtsrError, InfoKind, Result};

/// Alignment records on a single contig, returned when they overlap the query.
pub struct MemoryAlignments {
    pub contig: String,
    pub length: u64,
    pub records: Vec<AlignmentRecord>,
    /// Fail with an I/O error after this many records.
    pub fail_after: Option<usize>,
    /// The regions this source was queried with.
    pub queries: Vec<RegionSpec>,
}

impl MemoryAlignments {
    pub fn new(contig: &str, length: u64, records: Vec<AlignmentRecord>) -> Self {
        MemoryAlignments {
            contig: contig.to_string(),
            length,
            records,
            fail_after: None,
            queries: Vec::new(),
        }
    }
}

impl AlignmentSource for MemoryAlignments {
    fn contig_length(&self, contig: &str) -> Result<u64> {
        if contig == self.contig {
            Ok(self.length)
        } else {
            Err(HtsrError::NotFound(contig.to_string()))
        }
    }

    fn contig_id(&self, contig: &str) -> Result<usize> {
        self.contig_length(contig).map(|_| 0)
    }

    fn query<'a>(&'a mut self, region: &RegionSpec) -> Result<RecordStream<'a, AlignmentRecord>> {
        self.contig_length(region.contig())?;
        self.queries.push(region.clone());

        let (start, end) = (region.start(), region.end());
        let fail_after = self.fail_after;

        let stream = self
            .records
            .iter()
            .filter(move |r| r.position < end && r.end_position.max(r.position + 1) > start)
            .cloned()
            .enumerate()
            .map(move |(i, r)| match fail_after {
                Some(n) if i >= n => Err(HtsrError::Io(std::io::Error::other("truncated block"))),
                _ => Ok(r),
            });

        Ok(Box::new(stream))
    }
}

/// Variant records returned when their position falls inside the query.
pub struct MemoryVariants {
    pub samples: Vec<String>,
    pub records: Vec<VariantRecord>,
    pub declared: HashMap<String, InfoKind>,
    pub fail_after: Option<usize>,
}

impl MemoryVariants {
    pub fn new(samples: &[&str], records: Vec<VariantRecord>) -> Self {
        MemoryVariants {
            samples: samples.iter().map(|s| s.to_string()).collect(),
            records,
            declared: HashMap::new(),
            fail_after: None,
        }
    }
}

impl VariantSource for MemoryVariants {
    fn sample_names(&self) -> &[String] {
        &self.samples
    }

    fn declared_info_kind(&self, tag: &str) -> Option<InfoKind> {
        self.declared.get(tag).copied()
    }

    fn query<'a>(
        &'a mut self,
        region: &RegionSpec,
        _fields: &VariantFields,
    ) -> Result<RecordStream<'a, VariantRecord>> {
        let region = region.clone();
        let fail_after = self.fail_after;

        let stream = self
            .records
            .iter()
            .filter(move |r| r.contig == region.contig() && region.contains(r.position))
            .cloned()
            .enumerate()
            .map(move |(i, r)| match fail_after {
                Some(n) if i >= n => Err(HtsrError::Io(std::io::Error::other("truncated block"))),
                _ => Ok(r),
            });

        Ok(Box::new(stream))
    }
}
