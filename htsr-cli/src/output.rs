//! Writers for result tables: TSV with a header row, or JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use htsr_stats::{DepthRow, GcRow, GenotypeMatrix, InfoRow, InfoScalar, KmerRow};

use crate::config::OutputFormat;

/// A row that can be written as a tab-separated line.
pub trait TsvRow {
    fn header() -> &'static [&'static str];
    fn fields(&self) -> Vec<String>;
}

#[derive(Serialize)]
pub struct SequenceRow {
    pub sequence: String,
}

impl TsvRow for SequenceRow {
    fn header() -> &'static [&'static str] {
        &["sequence"]
    }

    fn fields(&self) -> Vec<String> {
        vec![self.sequence.clone()]
    }
}

impl TsvRow for KmerRow {
    fn header() -> &'static [&'static str] {
        &["sequence", "count"]
    }

    fn fields(&self) -> Vec<String> {
        vec![self.sequence.clone(), self.count.to_string()]
    }
}

impl TsvRow for GcRow {
    fn header() -> &'static [&'static str] {
        &["sequence", "gc_count", "gc_proportion"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.sequence.clone(),
            self.gc_count.to_string(),
            self.gc_proportion.to_string(),
        ]
    }
}

impl TsvRow for DepthRow {
    fn header() -> &'static [&'static str] {
        &["contig", "position", "depth"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.contig.clone(),
            self.position.to_string(),
            self.depth.to_string(),
        ]
    }
}

impl TsvRow for InfoRow {
    fn header() -> &'static [&'static str] {
        &["chrom", "pos", "value"]
    }

    fn fields(&self) -> Vec<String> {
        let value = match self.value {
            Some(InfoScalar::Integer(n)) => n.to_string(),
            Some(InfoScalar::Float(x)) => x.to_string(),
            None => ".".to_string(),
        };
        vec![self.chrom.clone(), self.pos.to_string(), value]
    }
}

///
/// Open `--output` for writing, or stdout when no path is given.
///
pub fn open_output(path: Option<&String>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = File::create(path)
                .with_context(|| format!("Can't create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

pub fn write_rows<T: TsvRow + Serialize>(
    rows: &[T],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            writeln!(out, "{}", T::header().join("\t"))?;
            for row in rows {
                writeln!(out, "{}", row.fields().join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct GenotypeJson<'a> {
    haplotypes: &'a [String],
    variants: &'a [htsr_stats::VariantSite],
    /// Row-major: one inner vector per haplotype.
    alleles: Vec<Vec<i32>>,
}

///
/// Write a genotype matrix with one row per haplotype and one column per
/// variant, labelled `chrom:pos` (1-based).
///
pub fn write_genotypes(
    matrix: &GenotypeMatrix,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            write!(out, "haplotype")?;
            for site in &matrix.variants {
                write!(out, "\t{}:{}", site.chrom, site.pos + 1)?;
            }
            writeln!(out)?;

            for (label, row) in matrix.haplotypes.iter().zip(matrix.alleles.rows()) {
                write!(out, "{}", label)?;
                for allele in row {
                    write!(out, "\t{}", allele)?;
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            let json = GenotypeJson {
                haplotypes: &matrix.haplotypes,
                variants: &matrix.variants,
                alleles: matrix.alleles.rows().into_iter().map(|r| r.to_vec()).collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
