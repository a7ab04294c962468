//! Diploid genotype matrices.

use log::{debug, info};
use ndarray::{Array2, ShapeBuilder};

use htsr_core::models::{GenotypeCall, RegionSpec, VariantFields};
use htsr_core::traits::VariantSource;
use htsr_core::{HtsrError, Result};

use crate::models::VariantSite;

///
/// Allele indices of every haplotype (rows) at every variant (columns).
///
/// Sample `s` owns rows `2s` and `2s + 1`. Entries are allele indices: 0 for the
/// reference, 1.. for the alternates.
///
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeMatrix {
    /// Row labels, `<sample>:<slot>`.
    pub haplotypes: Vec<String>,
    pub variants: Vec<VariantSite>,
    pub alleles: Array2<i32>,
}

impl GenotypeMatrix {
    pub fn shape(&self) -> (usize, usize) {
        self.alleles.dim()
    }
}

const PLOIDY: usize = 2;

///
/// Build a `2 × samples` by `variants` allele matrix for every variant in `region`.
///
/// Every record must be diploid for every sample, and missing calls are rejected.
/// Nothing is returned unless the whole region is read successfully.
///
pub fn extract_genotypes<S: VariantSource + ?Sized>(
    source: &mut S,
    region: &RegionSpec,
) -> Result<GenotypeMatrix> {
    let samples = source.sample_names().to_vec();
    info!("{} samples", samples.len());

    let rows = PLOIDY * samples.len();
    let mut flat: Vec<i32> = Vec::new();
    let mut variants = Vec::new();

    for record in source.query(region, &VariantFields::genotypes())? {
        let record = record?;
        let calls = record.genotypes.unwrap_or_default();

        let ploidy = calls.ploidy();
        if ploidy != PLOIDY {
            return Err(HtsrError::UnsupportedPloidy {
                contig: record.contig,
                position: record.position,
                ploidy,
            });
        }

        let column_start = flat.len();
        for i in 0..calls.sample_count {
            for call in calls.sample(i) {
                match call {
                    GenotypeCall::EndOfPloidy => break,
                    GenotypeCall::Missing => {
                        return Err(HtsrError::MissingGenotypeUnsupported {
                            contig: record.contig,
                            position: record.position,
                            sample: samples.get(i).cloned().unwrap_or_else(|| i.to_string()),
                        });
                    }
                    GenotypeCall::Allele(allele) => flat.push(*allele as i32),
                }
            }
        }

        let column_len = flat.len() - column_start;
        if column_len != rows {
            return Err(HtsrError::UnsupportedPloidy {
                contig: record.contig,
                position: record.position,
                ploidy: if samples.is_empty() { 0 } else { column_len / samples.len() },
            });
        }

        variants.push(VariantSite {
            chrom: record.contig,
            pos: record.position,
        });
    }
    debug!("{} variants x {} haplotypes", variants.len(), rows);

    let alleles = Array2::from_shape_vec((rows, variants.len()).f(), flat)
        .map_err(|e| HtsrError::MatrixShape(e.to_string()))?;

    let haplotypes = samples
        .iter()
        .flat_map(|s| (0..PLOIDY).map(move |slot| format!("{}:{}", s, slot)))
        .collect();

    Ok(GenotypeMatrix {
        haplotypes,
        variants,
        alleles,
    })
}
