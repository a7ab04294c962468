//! File format detection by magic bytes.

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::info;

use htsr_core::{HtsrError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// How many decompressed bytes are inspected.
const PEEK_LEN: u64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Sam,
    Bam,
    Cram,
    Vcf,
    Bcf,
    Bai,
    Csi,
    Tbi,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bgzf,
    /// A format with its own block compression (CRAM).
    Custom,
}

///
/// A detected file format. Displays like htslib's format description, e.g.
/// `BAM version 1 compressed sequence data`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub kind: FormatKind,
    pub version: Option<String>,
    pub compression: Compression,
}

impl FormatKind {
    fn name(&self) -> &'static str {
        match self {
            FormatKind::Sam => "SAM",
            FormatKind::Bam => "BAM",
            FormatKind::Cram => "CRAM",
            FormatKind::Vcf => "VCF",
            FormatKind::Bcf => "BCF",
            FormatKind::Bai => "BAI",
            FormatKind::Csi => "CSI",
            FormatKind::Tbi => "Tabix",
            FormatKind::Unknown => "unknown",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            FormatKind::Sam | FormatKind::Bam | FormatKind::Cram => "sequence data",
            FormatKind::Vcf | FormatKind::Bcf => "variant calling data",
            FormatKind::Bai | FormatKind::Csi | FormatKind::Tbi => "index",
            FormatKind::Unknown => "data",
        }
    }

    /// Binary formats that are BGZF by definition.
    fn always_bgzf(&self) -> bool {
        matches!(
            self,
            FormatKind::Bam | FormatKind::Bcf | FormatKind::Csi | FormatKind::Tbi
        )
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if let Some(version) = &self.version {
            write!(f, " version {}", version)?;
        }
        match self.compression {
            Compression::None => {}
            Compression::Gzip => write!(f, " gzip-compressed")?,
            Compression::Custom => write!(f, " compressed")?,
            Compression::Bgzf if self.kind.always_bgzf() => write!(f, " compressed")?,
            Compression::Bgzf => write!(f, " BGZF-compressed")?,
        }
        write!(f, " {}", self.kind.category())
    }
}

/// A gzip member is BGZF when it carries the `BC` extra subfield.
fn is_bgzf(head: &[u8]) -> bool {
    head.len() >= 16
        && head[..2] == GZIP_MAGIC
        && head[3] & 0x04 != 0
        && head[12] == b'B'
        && head[13] == b'C'
}

fn vcf_version(text: &[u8]) -> Option<String> {
    let line = text.split(|&b| b == b'\n').next()?;
    let line = std::str::from_utf8(line).ok()?;
    line.strip_prefix("##fileformat=VCFv")
        .map(|v| v.trim_end().to_string())
}

fn sam_version(text: &[u8]) -> Option<String> {
    let line = text.split(|&b| b == b'\n').next()?;
    let line = std::str::from_utf8(line).ok()?;
    if !line.starts_with("@HD") {
        return None;
    }
    line.split('\t')
        .find_map(|field| field.strip_prefix("VN:"))
        .map(|v| v.trim_end().to_string())
}

/// Identify the format from the first (decompressed) bytes of a file.
fn classify(data: &[u8]) -> (FormatKind, Option<String>) {
    if data.starts_with(b"BAM\x01") {
        (FormatKind::Bam, Some("1".to_string()))
    } else if data.starts_with(b"BAI\x01") {
        (FormatKind::Bai, Some("1".to_string()))
    } else if data.starts_with(b"CSI\x01") {
        (FormatKind::Csi, Some("1".to_string()))
    } else if data.starts_with(b"TBI\x01") {
        (FormatKind::Tbi, Some("1".to_string()))
    } else if data.starts_with(b"BCF") && data.len() >= 5 {
        (FormatKind::Bcf, Some(format!("{}.{}", data[3], data[4])))
    } else if data.starts_with(b"CRAM") && data.len() >= 6 {
        (FormatKind::Cram, Some(format!("{}.{}", data[4], data[5])))
    } else if data.starts_with(b"##fileformat=VCF") {
        (FormatKind::Vcf, vcf_version(data))
    } else if data.first() == Some(&b'@') {
        (FormatKind::Sam, sam_version(data))
    } else {
        (FormatKind::Unknown, None)
    }
}

///
/// Detect the format of a file by its magic bytes, looking through gzip/BGZF
/// compression when present.
///
/// # Arguments
/// - path: path to the file
///
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<Format> {
    let path = path.as_ref();
    let file_error = |source| HtsrError::FileError {
        path: path.display().to_string(),
        source,
    };

    let mut head = Vec::new();
    File::open(path)
        .map_err(file_error)?
        .take(18)
        .read_to_end(&mut head)
        .map_err(file_error)?;

    let format = if head.starts_with(&GZIP_MAGIC) {
        let compression = if is_bgzf(&head) {
            Compression::Bgzf
        } else {
            Compression::Gzip
        };

        let file = File::open(path).map_err(file_error)?;
        let mut data = Vec::new();
        MultiGzDecoder::new(BufReader::new(file))
            .take(PEEK_LEN)
            .read_to_end(&mut data)
            .map_err(file_error)?;

        let (kind, version) = classify(&data);
        Format {
            kind,
            version,
            compression,
        }
    } else {
        let mut data = Vec::new();
        File::open(path)
            .map_err(file_error)?
            .take(PEEK_LEN)
            .read_to_end(&mut data)
            .map_err(file_error)?;

        let (kind, version) = classify(&data);
        let compression = if kind == FormatKind::Cram {
            Compression::Custom
        } else {
            Compression::None
        };
        Format {
            kind,
            version,
            compression,
        }
    };

    info!("detected format {}", format);
    Ok(format)
}
