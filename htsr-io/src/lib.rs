//! # htsr-io
//!
//! Indexed readers for alignment and variant files, backed by noodles. Each store owns
//! its reader, header and index, and implements one of the htsr-core record-source
//! traits so the analytics in htsr-stats can run against it.
//!
//! Supported inputs:
//! - BAM with a BAI or CSI index ([AlignmentStore])
//! - bgzipped VCF with a tabix or CSI index, and BCF with a CSI index ([VariantStore])
//!
//! CRAM is recognised by [detect_format] but can't be opened.
pub mod alignment;
pub mod format;
pub mod index;
pub mod variant;

mod region;

// re-expose the stores
pub use alignment::AlignmentStore;
pub use format::{Compression, Format, FormatKind, detect_format};
pub use index::IndexKind;
pub use variant::VariantStore;
