use crate::errors::InfoKind;

/// One value of an INFO field.
#[derive(PartialEq, Debug, Clone)]
pub enum InfoValue {
    Integer(i32),
    Float(f32),
    Character(char),
    String(String),
    /// A `.` placeholder.
    Missing,
}

impl InfoValue {
    /// The kind of this value, or `None` for a missing placeholder.
    pub fn kind(&self) -> Option<InfoKind> {
        match self {
            InfoValue::Integer(_) => Some(InfoKind::Integer),
            InfoValue::Float(_) => Some(InfoKind::Float),
            InfoValue::Character(_) => Some(InfoKind::Character),
            InfoValue::String(_) => Some(InfoKind::String),
            InfoValue::Missing => None,
        }
    }
}

///
/// A named INFO field on one variant record. A flag has no values, so its
/// arity is 0.
///
#[derive(PartialEq, Debug, Clone)]
pub struct InfoField {
    pub values: Vec<InfoValue>,
}

impl InfoField {
    pub fn scalar(value: InfoValue) -> Self {
        InfoField {
            values: vec![value],
        }
    }

    pub fn flag() -> Self {
        InfoField { values: Vec::new() }
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }
}

/// One ploidy slot of a sample's genotype.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GenotypeCall {
    /// 0 is the reference allele, 1.. the alternate alleles in ALT order.
    Allele(u32),
    Missing,
    /// Padding for samples with fewer alleles than the record's widest sample.
    EndOfPloidy,
}

///
/// Genotype calls for every sample of a record, flattened sample-major. Each
/// sample occupies the same number of slots; shorter samples are padded with
/// [GenotypeCall::EndOfPloidy].
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct GenotypeCalls {
    pub sample_count: usize,
    pub calls: Vec<GenotypeCall>,
}

impl GenotypeCalls {
    ///
    /// Flatten per-sample allele lists, padding every sample to the widest one.
    ///
    pub fn from_samples(samples: Vec<Vec<GenotypeCall>>) -> Self {
        let sample_count = samples.len();
        let width = samples.iter().map(|s| s.len()).max().unwrap_or(0);

        let mut calls = Vec::with_capacity(sample_count * width);
        for mut sample in samples {
            sample.resize(width, GenotypeCall::EndOfPloidy);
            calls.extend(sample);
        }

        GenotypeCalls {
            sample_count,
            calls,
        }
    }

    /// Total calls divided by the number of samples; 0 when there are no samples.
    pub fn ploidy(&self) -> usize {
        if self.sample_count == 0 {
            return 0;
        }
        self.calls.len() / self.sample_count
    }

    ///
    /// The slots belonging to sample `i`.
    ///
    pub fn sample(&self, i: usize) -> &[GenotypeCall] {
        let ploidy = self.ploidy();
        let start = (i * ploidy).min(self.calls.len());
        let end = (start + ploidy).min(self.calls.len());
        &self.calls[start..end]
    }
}

///
/// An owned snapshot of one variant record. Only the INFO fields and genotypes
/// requested for the query are copied out of the reader.
///
#[derive(PartialEq, Debug, Clone, Default)]
pub struct VariantRecord {
    pub contig: String,
    /// 0-based position.
    pub position: u64,
    pub info: Vec<(String, InfoField)>,
    pub genotypes: Option<GenotypeCalls>,
}

impl VariantRecord {
    pub fn new(contig: &str, position: u64) -> Self {
        VariantRecord {
            contig: contig.to_string(),
            position,
            ..Default::default()
        }
    }

    pub fn with_info(mut self, tag: &str, field: InfoField) -> Self {
        self.info.push((tag.to_string(), field));
        self
    }

    pub fn with_genotypes(mut self, genotypes: GenotypeCalls) -> Self {
        self.genotypes = Some(genotypes);
        self
    }

    ///
    /// Look up an INFO field by tag. `None` means the tag isn't present on this record.
    ///
    pub fn info_field(&self, tag: &str) -> Option<&InfoField> {
        self.info
            .iter()
            .find(|(key, _)| key == tag)
            .map(|(_, field)| field)
    }
}

///
/// What a variant query should copy into each [VariantRecord].
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VariantFields {
    pub info: Vec<String>,
    pub genotypes: bool,
}

impl VariantFields {
    pub fn info(tag: &str) -> Self {
        VariantFields {
            info: vec![tag.to_string()],
            genotypes: false,
        }
    }

    pub fn genotypes() -> Self {
        VariantFields {
            info: Vec::new(),
            genotypes: true,
        }
    }
}
