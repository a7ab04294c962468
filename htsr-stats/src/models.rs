use serde::Serialize;

/// One read and how often the k-mer occurs in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KmerRow {
    pub sequence: String,
    pub count: usize,
}

/// One read with its G+C count and proportion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GcRow {
    pub sequence: String,
    pub gc_count: usize,
    /// NaN for reads without bases.
    pub gc_proportion: f64,
}

/// Depth at a single 0-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthRow {
    pub contig: String,
    pub position: u64,
    pub depth: u32,
}

///
/// Per-position depth over a window, stored as one contiguous vector.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DepthTable {
    pub contig: String,
    /// 0-based position of `depths[0]`.
    pub start: u64,
    pub depths: Vec<u32>,
}

impl DepthTable {
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = DepthRow> + '_ {
        self.depths.iter().enumerate().map(|(i, &depth)| DepthRow {
            contig: self.contig.clone(),
            position: self.start + i as u64,
            depth,
        })
    }
}

/// A single-valued numeric INFO value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InfoScalar {
    Integer(i32),
    Float(f32),
}

/// INFO value of one variant; `None` when the value is `.` or the tag is absent
/// and absent tags are allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoRow {
    pub chrom: String,
    pub pos: u64,
    pub value: Option<InfoScalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoTable {
    pub tag: String,
    pub rows: Vec<InfoRow>,
}

/// A variant column of a genotype matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSite {
    pub chrom: String,
    pub pos: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_depth_rows() {
        let table = DepthTable {
            contig: "chr2".to_string(),
            start: 7,
            depths: vec![0, 3],
        };
        let rows: Vec<DepthRow> = table.rows().collect();
        assert_eq!(
            rows,
            vec![
                DepthRow {
                    contig: "chr2".to_string(),
                    position: 7,
                    depth: 0
                },
                DepthRow {
                    contig: "chr2".to_string(),
                    position: 8,
                    depth: 3
                },
            ]
        );
    }

    #[rstest]
    fn test_info_row_serializes_untagged() {
        let row = InfoRow {
            chrom: "1".to_string(),
            pos: 5,
            value: Some(InfoScalar::Integer(2)),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"chrom":"1","pos":5,"value":2}"#);
    }
}
