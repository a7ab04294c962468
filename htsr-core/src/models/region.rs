use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{HtsrError, Result};

///
/// A genomic interval on a named contig, stored 0-based and half-open: `[start, end)`.
///
/// Region strings use the 1-based, inclusive `contig:start-end` convention, so
/// `"chr1:100-200"` becomes `chr1`, `[99, 200)`. The contig name is everything up to
/// the *first* `:`, which means contigs whose names contain `:` can't be addressed
/// with a region string.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionSpec {
    contig: String,
    start: u64,
    end: u64,
}

impl RegionSpec {
    ///
    /// Create a region from 0-based, half-open coordinates.
    ///
    pub fn new(contig: &str, start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(HtsrError::MalformedRegion(format!(
                "{}: start {} is greater than end {}",
                contig, start, end
            )));
        }
        Ok(RegionSpec {
            contig: contig.to_string(),
            start,
            end,
        })
    }

    ///
    /// Parse a 1-based, inclusive `contig:start-end` region string.
    ///
    pub fn parse(region: &str) -> Result<Self> {
        let malformed = |reason: &str| HtsrError::MalformedRegion(format!("'{}': {}", region, reason));

        let (contig, bounds) = region
            .split_once(':')
            .ok_or_else(|| malformed("expected contig:start-end"))?;

        if contig.is_empty() {
            return Err(malformed("contig name is empty"));
        }

        let (start, end) = bounds
            .split_once('-')
            .ok_or_else(|| malformed("expected start-end after the contig"))?;

        let start = start
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed("start is not a non-negative integer"))?;
        let end = end
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed("end is not a non-negative integer"))?;

        if start == 0 {
            return Err(malformed("start is 1-based and must be at least 1"));
        }
        if start > end {
            return Err(malformed("start is greater than end"));
        }

        RegionSpec::new(contig, start - 1, end)
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// 0-based inclusive start.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// 0-based exclusive end.
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position < self.end
    }

    ///
    /// Restrict the region to `[0, contig_length)`.
    ///
    pub fn clamp_end(&self, contig_length: u64) -> RegionSpec {
        let end = self.end.min(contig_length);
        RegionSpec {
            contig: self.contig.clone(),
            start: self.start.min(end),
            end,
        }
    }

    ///
    /// Widen the region by `flank_bp` on both sides, staying inside `[0, contig_length)`.
    ///
    pub fn flanked(&self, flank_bp: u64, contig_length: u64) -> RegionSpec {
        let end = self.end.saturating_add(flank_bp).min(contig_length);
        RegionSpec {
            contig: self.contig.clone(),
            start: self.start.saturating_sub(flank_bp).min(end),
            end,
        }
    }
}

impl FromStr for RegionSpec {
    type Err = HtsrError;

    fn from_str(s: &str) -> Result<Self> {
        RegionSpec::parse(s)
    }
}

impl Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start + 1, self.end)
    }
}
