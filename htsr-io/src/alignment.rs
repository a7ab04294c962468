//! Indexed BAM access.

use std::fs::File;
use std::io;
use std::path::Path;

use log::{debug, info};
use noodles::bam;
use noodles::bgzf;
use noodles::csi;
use noodles::sam;
use noodles::sam::alignment::Record as SamRecord;

use htsr_core::models::{AlignmentRecord, RegionSpec};
use htsr_core::traits::{AlignmentSource, RecordStream};
use htsr_core::utils::unpack_nt16;
use htsr_core::{HtsrError, Result};

use crate::format::{FormatKind, detect_format};
use crate::index::{IndexKind, index_error, resolve_index};
use crate::region::to_noodles_region;

type BamReader = bam::io::IndexedReader<bgzf::Reader<File>>;

///
/// An open, indexed BAM file. Owns its reader, header and index; dropping the
/// store closes the file.
///
pub struct AlignmentStore {
    reader: BamReader,
    header: sam::Header,
    index_kind: IndexKind,
}

impl AlignmentStore {
    ///
    /// Open a BAM file with a BAI or CSI index.
    ///
    /// # Arguments
    /// - path: path to the BAM file
    /// - index_path: path to the index; defaults to `<path>.bai`, then `<path>.csi`
    /// - index_kind: the index format; detected from the index file when not given
    ///
    pub fn open<P: AsRef<Path>>(
        path: P,
        index_path: Option<&Path>,
        index_kind: Option<IndexKind>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let format = detect_format(path)?;
        match format.kind {
            FormatKind::Bam => {}
            FormatKind::Cram => return Err(HtsrError::NotImplemented(format!("{}", format))),
            _ => {
                return Err(HtsrError::FileError {
                    path: path.display().to_string(),
                    source: io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("expected BAM, found {}", format),
                    ),
                });
            }
        }
        let (index_path, index_kind) = resolve_index(path, index_path, index_kind, &["bai", "csi"])?;

        let builder = match index_kind {
            IndexKind::Bai => {
                let index = bam::bai::read(&index_path).map_err(|e| index_error(&index_path, e))?;
                bam::io::indexed_reader::Builder::default().set_index(index)
            }
            IndexKind::Csi => {
                let index = csi::read(&index_path).map_err(|e| index_error(&index_path, e))?;
                bam::io::indexed_reader::Builder::default().set_index(index)
            }
            IndexKind::Tabix => {
                return Err(index_error(&index_path, "a tabix index can't be used with BAM"));
            }
        };

        let file_error = |source| HtsrError::FileError {
            path: path.display().to_string(),
            source,
        };
        let mut reader = builder.build_from_path(path).map_err(file_error)?;
        let header = reader.read_header().map_err(file_error)?;

        info!(
            "opened {} with {} index ({} reference sequences)",
            path.display(),
            index_kind,
            header.reference_sequences().len()
        );

        Ok(AlignmentStore {
            reader,
            header,
            index_kind,
        })
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index_kind
    }

    pub fn header(&self) -> &sam::Header {
        &self.header
    }
}

fn snapshot(record: &bam::Record) -> Result<AlignmentRecord> {
    let position = match record.alignment_start().transpose()? {
        Some(start) => usize::from(start) as u64 - 1,
        None => 0,
    };
    let end_position = match SamRecord::alignment_end(record).transpose()? {
        Some(end) => usize::from(end) as u64,
        None => position,
    };

    let sequence = record.sequence();
    let bases = unpack_nt16(sequence.as_ref(), sequence.len());

    Ok(AlignmentRecord {
        position,
        end_position,
        flags: record.flags().bits(),
        bases,
    })
}

impl AlignmentSource for AlignmentStore {
    fn contig_length(&self, contig: &str) -> Result<u64> {
        self.header
            .reference_sequences()
            .get(contig.as_bytes())
            .map(|rs| usize::from(rs.length()) as u64)
            .ok_or_else(|| HtsrError::NotFound(contig.to_string()))
    }

    fn contig_id(&self, contig: &str) -> Result<usize> {
        self.header
            .reference_sequences()
            .get_index_of(contig.as_bytes())
            .ok_or_else(|| HtsrError::NotFound(contig.to_string()))
    }

    fn query<'a>(&'a mut self, region: &RegionSpec) -> Result<RecordStream<'a, AlignmentRecord>> {
        self.contig_id(region.contig())?;
        if region.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let noodles_region = to_noodles_region(region)?;
        debug!("BAM query {}", noodles_region);

        let query = self.reader.query(&self.header, &noodles_region)?;
        Ok(Box::new(query.map(|result| {
            let record = result?;
            snapshot(&record)
        })))
    }
}
