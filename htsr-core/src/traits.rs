use crate::errors::{InfoKind, Result};
use crate::models::{AlignmentRecord, RegionSpec, VariantFields, VariantRecord};

/// A finite, non-restartable stream of records for one region query.
pub type RecordStream<'a, R> = Box<dyn Iterator<Item = Result<R>> + 'a>;

///
/// An indexed store of alignment records that can answer region queries.
///
/// Records are yielded in ascending start order and include every record
/// overlapping the queried interval.
///
pub trait AlignmentSource {
    /// Length of a contig, from the header.
    fn contig_length(&self, contig: &str) -> Result<u64>;

    /// Numeric id of a contig, from the header.
    fn contig_id(&self, contig: &str) -> Result<usize>;

    fn query<'a>(&'a mut self, region: &RegionSpec) -> Result<RecordStream<'a, AlignmentRecord>>;
}

///
/// An indexed store of variant records that can answer region queries.
///
pub trait VariantSource {
    fn sample_names(&self) -> &[String];

    /// The INFO type declared for `tag` in the header, if the store knows it.
    fn declared_info_kind(&self, _tag: &str) -> Option<InfoKind> {
        None
    }

    fn query<'a>(
        &'a mut self,
        region: &RegionSpec,
        fields: &VariantFields,
    ) -> Result<RecordStream<'a, VariantRecord>>;
}
