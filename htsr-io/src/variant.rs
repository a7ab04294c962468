//! Indexed VCF and BCF access.

use std::fs::File;
use std::io;
use std::path::Path;

use log::{debug, info};
use noodles::bcf;
use noodles::bgzf;
use noodles::csi;
use noodles::tabix;
use noodles::vcf;
use noodles::vcf::header::record::value::map::info::Type as InfoType;
use noodles::vcf::variant::Record as _;
use noodles::vcf::variant::record::info::field::Value as InfoFieldValue;
use noodles::vcf::variant::record::info::field::value::Array;
use noodles::vcf::variant::record::info::field::value::array::Values as _;
use noodles::vcf::variant::record::samples::Sample as _;
use noodles::vcf::variant::record::samples::series::Value as SampleValue;
use noodles::vcf::variant::record::samples::series::value::Genotype as _;
use noodles::vcf::variant::record::{Info as _, Samples as _};

use htsr_core::models::{
    GenotypeCall, GenotypeCalls, InfoField, InfoValue, RegionSpec, VariantFields, VariantRecord,
};
use htsr_core::traits::{RecordStream, VariantSource};
use htsr_core::{HtsrError, InfoKind, Result};

use crate::format::{FormatKind, detect_format};
use crate::index::{IndexKind, index_error, resolve_index};
use crate::region::to_noodles_region;

enum VariantReader {
    Vcf(vcf::io::IndexedReader<bgzf::Reader<File>>),
    Bcf(bcf::io::IndexedReader<bgzf::Reader<File>>),
}

///
/// An open, indexed VCF (bgzipped, TBI or CSI) or BCF (CSI) file.
///
pub struct VariantStore {
    reader: VariantReader,
    header: vcf::Header,
    samples: Vec<String>,
    index_kind: IndexKind,
}

impl VariantStore {
    ///
    /// Open a bgzipped VCF or a BCF with its index.
    ///
    /// # Arguments
    /// - path: path to the variant file
    /// - index_path: path to the index; defaults to `<path>.tbi`, then `<path>.csi`
    /// - index_kind: the index format; detected from the index file when not given
    ///
    pub fn open<P: AsRef<Path>>(
        path: P,
        index_path: Option<&Path>,
        index_kind: Option<IndexKind>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let format = detect_format(path)?;
        let (index_path, index_kind) = resolve_index(path, index_path, index_kind, &["tbi", "csi"])?;

        let file_error = |source| HtsrError::FileError {
            path: path.display().to_string(),
            source,
        };

        let (reader, header) = match (format.kind, index_kind) {
            (FormatKind::Vcf, IndexKind::Tabix) => {
                let index = tabix::read(&index_path).map_err(|e| index_error(&index_path, e))?;
                let mut reader = vcf::io::indexed_reader::Builder::default()
                    .set_index(index)
                    .build_from_path(path)
                    .map_err(file_error)?;
                let header = reader.read_header().map_err(file_error)?;
                (VariantReader::Vcf(reader), header)
            }
            (FormatKind::Vcf, IndexKind::Csi) => {
                let index = csi::read(&index_path).map_err(|e| index_error(&index_path, e))?;
                let mut reader = vcf::io::indexed_reader::Builder::default()
                    .set_index(index)
                    .build_from_path(path)
                    .map_err(file_error)?;
                let header = reader.read_header().map_err(file_error)?;
                (VariantReader::Vcf(reader), header)
            }
            (FormatKind::Bcf, IndexKind::Csi) => {
                let index = csi::read(&index_path).map_err(|e| index_error(&index_path, e))?;
                let mut reader = bcf::io::indexed_reader::Builder::default()
                    .set_index(index)
                    .build_from_path(path)
                    .map_err(file_error)?;
                let header = reader.read_header().map_err(file_error)?;
                (VariantReader::Bcf(reader), header)
            }
            (FormatKind::Vcf | FormatKind::Bcf, kind) => {
                return Err(index_error(
                    &index_path,
                    format!("a {} index can't be used with {}", kind, format),
                ));
            }
            _ => {
                return Err(HtsrError::FileError {
                    path: path.display().to_string(),
                    source: io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("expected VCF or BCF, found {}", format),
                    ),
                });
            }
        };

        let samples: Vec<String> = header.sample_names().iter().cloned().collect();
        info!("detecting format {}", format);
        info!("{} samples", samples.len());

        Ok(VariantStore {
            reader,
            header,
            samples,
            index_kind,
        })
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index_kind
    }

    pub fn header(&self) -> &vcf::Header {
        &self.header
    }
}

fn collect_values<N, I, F>(values: I, f: F) -> io::Result<Vec<InfoValue>>
where
    I: Iterator<Item = io::Result<Option<N>>>,
    F: Fn(N) -> InfoValue,
{
    values
        .map(|value| value.map(|v| v.map_or(InfoValue::Missing, &f)))
        .collect()
}

fn info_field(value: Option<InfoFieldValue<'_>>) -> io::Result<InfoField> {
    let Some(value) = value else {
        return Ok(InfoField::scalar(InfoValue::Missing));
    };

    let values = match value {
        InfoFieldValue::Flag => return Ok(InfoField::flag()),
        InfoFieldValue::Integer(n) => vec![InfoValue::Integer(n)],
        InfoFieldValue::Float(x) => vec![InfoValue::Float(x)],
        InfoFieldValue::Character(c) => vec![InfoValue::Character(c)],
        InfoFieldValue::String(s) => vec![InfoValue::String(s.to_string())],
        InfoFieldValue::Array(Array::Integer(values)) => collect_values(values.iter(), InfoValue::Integer)?,
        InfoFieldValue::Array(Array::Float(values)) => collect_values(values.iter(), InfoValue::Float)?,
        InfoFieldValue::Array(Array::Character(values)) => {
            collect_values(values.iter(), InfoValue::Character)?
        }
        InfoFieldValue::Array(Array::String(values)) => {
            collect_values(values.iter(), |s| InfoValue::String(s.to_string()))?
        }
    };

    Ok(InfoField { values })
}

fn genotype_calls<R: vcf::variant::Record>(record: &R, header: &vcf::Header) -> Result<GenotypeCalls> {
    let samples = record.samples()?;

    let mut calls = Vec::new();
    for sample in samples.iter() {
        let sample_calls = match sample.get(header, "GT").transpose()? {
            None | Some(None) => vec![GenotypeCall::Missing],
            Some(Some(SampleValue::Genotype(genotype))) => genotype
                .iter()
                .map(|allele| {
                    allele.map(|(position, _phasing)| match position {
                        Some(i) => GenotypeCall::Allele(i as u32),
                        None => GenotypeCall::Missing,
                    })
                })
                .collect::<io::Result<Vec<_>>>()?,
            Some(Some(_)) => {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "GT is not a genotype").into());
            }
        };
        calls.push(sample_calls);
    }

    Ok(GenotypeCalls::from_samples(calls))
}

fn snapshot<R: vcf::variant::Record>(
    record: &R,
    header: &vcf::Header,
    fields: &VariantFields,
) -> Result<VariantRecord> {
    let contig = record.reference_sequence_name(header)?;
    let position = match record.variant_start().transpose()? {
        Some(start) => usize::from(start) as u64 - 1,
        None => 0,
    };

    let mut snapshot = VariantRecord::new(contig, position);

    if !fields.info.is_empty() {
        let info = record.info();
        for tag in &fields.info {
            if let Some(value) = info.get(header, tag) {
                snapshot = snapshot.with_info(tag, info_field(value?)?);
            }
        }
    }

    if fields.genotypes {
        snapshot = snapshot.with_genotypes(genotype_calls(record, header)?);
    }

    Ok(snapshot)
}

impl VariantSource for VariantStore {
    fn sample_names(&self) -> &[String] {
        &self.samples
    }

    fn declared_info_kind(&self, tag: &str) -> Option<InfoKind> {
        self.header.infos().get(tag).map(|info| match info.ty() {
            InfoType::Integer => InfoKind::Integer,
            InfoType::Float => InfoKind::Float,
            InfoType::Flag => InfoKind::Flag,
            InfoType::Character => InfoKind::Character,
            InfoType::String => InfoKind::String,
        })
    }

    fn query<'a>(
        &'a mut self,
        region: &RegionSpec,
        fields: &VariantFields,
    ) -> Result<RecordStream<'a, VariantRecord>> {
        let contigs = self.header.contigs();
        if !contigs.is_empty() && !contigs.contains_key(region.contig()) {
            return Err(HtsrError::NotFound(region.contig().to_string()));
        }
        if region.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let noodles_region = to_noodles_region(region)?;
        debug!("variant query {}", noodles_region);

        let header = &self.header;
        let fields = fields.clone();

        match &mut self.reader {
            VariantReader::Vcf(reader) => {
                let query = reader.query(header, &noodles_region)?;
                Ok(Box::new(query.map(move |result| {
                    let record = result?;
                    snapshot(&record, header, &fields)
                })))
            }
            VariantReader::Bcf(reader) => {
                let query = reader.query(header, &noodles_region)?;
                Ok(Box::new(query.map(move |result| {
                    let record = result?;
                    snapshot(&record, header, &fields)
                })))
            }
        }
    }
}
