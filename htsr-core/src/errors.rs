use std::fmt::{self, Display};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtsrError {
    #[error("Can't open file {path}: {source}")]
    FileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't load index {path}: {reason}")]
    IndexError { path: String, reason: String },

    #[error("Malformed region: {0}")]
    MalformedRegion(String),

    #[error("Contig not found in header: {0}")]
    NotFound(String),

    #[error("Unsupported ploidy {ploidy} at {contig}:{position}. Only diploid genotypes are supported")]
    UnsupportedPloidy {
        contig: String,
        position: u64,
        ploidy: usize,
    },

    #[error("Missing genotype for sample {sample} at {contig}:{position}. Missing calls are not supported")]
    MissingGenotypeUnsupported {
        contig: String,
        position: u64,
        sample: String,
    },

    #[error("INFO field '{tag}' does not exist at {contig}:{position}")]
    FieldNotFound {
        tag: String,
        contig: String,
        position: u64,
    },

    #[error("INFO field '{tag}' has {arity} values at {contig}:{position}. Only single-valued fields are supported")]
    UnsupportedArity {
        tag: String,
        arity: usize,
        contig: String,
        position: u64,
    },

    #[error("Not yet implemented: {0}")]
    NotImplemented(String),

    #[error("INFO field '{tag}' at {contig}:{position} is {found}, expected {expected}")]
    InfoTypeMismatch {
        tag: String,
        expected: InfoKind,
        found: InfoKind,
        contig: String,
        position: u64,
    },

    #[error("Can't shape genotype matrix: {0}")]
    MatrixShape(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HtsrError>;

/// Value type of an INFO field, as declared in a header or observed on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InfoKind {
    Integer,
    Float,
    Character,
    String,
    Flag,
}

impl Display for InfoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoKind::Integer => write!(f, "Integer"),
            InfoKind::Float => write!(f, "Float"),
            InfoKind::Character => write!(f, "Character"),
            InfoKind::String => write!(f, "String"),
            InfoKind::Flag => write!(f, "Flag"),
        }
    }
}
