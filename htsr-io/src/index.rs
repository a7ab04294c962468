use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::info;

use htsr_core::{HtsrError, Result};

///
/// On-disk coordinate index formats. Resolved once when a store is opened.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// BAM index, uncompressed, magic `BAI\1`.
    Bai,
    /// Coordinate-sorted index, BGZF-compressed, magic `CSI\1`.
    Csi,
    /// Tabix index, BGZF-compressed, magic `TBI\1`.
    Tabix,
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Bai => write!(f, "BAI"),
            IndexKind::Csi => write!(f, "CSI"),
            IndexKind::Tabix => write!(f, "TBI"),
        }
    }
}

impl IndexKind {
    ///
    /// Detect the kind of an index file from its magic bytes.
    ///
    pub fn detect<P: AsRef<Path>>(path: P) -> Result<IndexKind> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HtsrError::FileError {
            path: path.display().to_string(),
            source,
        })?;

        let mut reader = BufReader::new(file);
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|e| index_error(path, e))?;

        let kind = if &magic == b"BAI\x01" {
            IndexKind::Bai
        } else if magic[..2] == [0x1f, 0x8b] {
            let file = File::open(path).map_err(|e| index_error(path, e))?;
            let mut decoded = [0u8; 4];
            MultiGzDecoder::new(BufReader::new(file))
                .read_exact(&mut decoded)
                .map_err(|e| index_error(path, e))?;

            match &decoded {
                b"CSI\x01" => IndexKind::Csi,
                b"TBI\x01" => IndexKind::Tabix,
                _ => return Err(index_error(path, "unrecognised index magic")),
            }
        } else {
            return Err(index_error(path, "unrecognised index magic"));
        };

        info!("detected {} index at {}", kind, path.display());
        Ok(kind)
    }
}

pub(crate) fn index_error<E: ToString>(path: &Path, reason: E) -> HtsrError {
    HtsrError::IndexError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

///
/// Find the index next to `path`, trying each extension in turn
/// (`sample.bam` -> `sample.bam.bai`).
///
pub(crate) fn find_index(path: &Path, extensions: &[&str]) -> Result<PathBuf> {
    for ext in extensions {
        let mut candidate = path.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(index_error(
        path,
        format!("no index found (tried .{})", extensions.join(", .")),
    ))
}

///
/// Use the given index path and kind, or locate and sniff them.
///
pub(crate) fn resolve_index(
    path: &Path,
    index_path: Option<&Path>,
    kind: Option<IndexKind>,
    extensions: &[&str],
) -> Result<(PathBuf, IndexKind)> {
    let index_path = match index_path {
        Some(p) => p.to_path_buf(),
        None => find_index(path, extensions)?,
    };
    let kind = match kind {
        Some(kind) => kind,
        None => IndexKind::detect(&index_path)?,
    };
    Ok((index_path, kind))
}
