use noodles::core::{Position, Region};

use htsr_core::models::RegionSpec;
use htsr_core::{HtsrError, Result};

///
/// Convert a 0-based half-open region to noodles' 1-based closed region.
/// The region must not be empty.
///
pub(crate) fn to_noodles_region(region: &RegionSpec) -> Result<Region> {
    let malformed = |_| HtsrError::MalformedRegion(region.to_string());
    let start = Position::try_from(region.start() as usize + 1).map_err(malformed)?;
    let end = Position::try_from(region.end() as usize).map_err(malformed)?;
    Ok(Region::new(region.contig(), start..=end))
}
