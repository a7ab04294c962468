//! Core types for htsr.
//!
//! This crate holds the pieces every other htsr crate agrees on: the [`RegionSpec`](models::RegionSpec)
//! parsed from `contig:start-end` strings, owned snapshots of alignment and variant records,
//! the record-source traits that the analytics in `htsr-stats` consume, and the shared
//! error type.
//!
//! Nothing in here touches the filesystem. Opening BAM/VCF/BCF files and loading their
//! indexes lives in `htsr-io`.
//!
//! ```rust
//! use htsr_core::models::RegionSpec;
//!
//! let region: RegionSpec = "chr1:10001-10050".parse().unwrap();
//! assert_eq!(region.start(), 10000);
//! assert_eq!(region.end(), 10050);
//! ```
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

pub use errors::{HtsrError, InfoKind, Result};
