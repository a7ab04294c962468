pub mod alignment;
pub mod region;
pub mod variant;

// re-export for cleaner imports
pub use self::alignment::AlignmentRecord;
pub use self::region::RegionSpec;
pub use self::variant::{
    GenotypeCall, GenotypeCalls, InfoField, InfoValue, VariantFields, VariantRecord,
};
