//! Single-valued numeric INFO field extraction.

use log::debug;
use serde::{Deserialize, Serialize};

use htsr_core::models::{InfoValue, RegionSpec, VariantFields};
use htsr_core::traits::VariantSource;
use htsr_core::{HtsrError, InfoKind, Result};

use crate::models::{InfoRow, InfoScalar, InfoTable};

/// What to do with a record that doesn't carry the requested tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    #[default]
    Fail,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoOptions {
    pub on_missing: MissingFieldPolicy,
    /// Kind every value must have. Falls back to the header's declared type.
    #[serde(skip)]
    pub expected: Option<InfoKind>,
}

fn check_supported(tag: &str, kind: InfoKind, region: &RegionSpec) -> Result<()> {
    match kind {
        InfoKind::Integer | InfoKind::Float => Ok(()),
        InfoKind::Character | InfoKind::String => Err(HtsrError::NotImplemented(format!(
            "{} INFO field '{}'",
            kind, tag
        ))),
        InfoKind::Flag => Err(HtsrError::UnsupportedArity {
            tag: tag.to_string(),
            arity: 0,
            contig: region.contig().to_string(),
            position: region.start(),
        }),
    }
}

///
/// Extract the value of INFO field `tag` from every variant in `region`.
///
/// Only fields holding exactly one Integer or Float value are supported. A `.`
/// value becomes `None`.
///
/// # Arguments
/// - source: the variant store to query
/// - region: the region of interest
/// - tag: the INFO key, e.g. `DP`
/// - options: missing-field policy and expected value kind
///
pub fn extract_info<S: VariantSource + ?Sized>(
    source: &mut S,
    region: &RegionSpec,
    tag: &str,
    options: &InfoOptions,
) -> Result<InfoTable> {
    let expected = options.expected.or_else(|| source.declared_info_kind(tag));
    if let Some(kind) = expected {
        check_supported(tag, kind, region)?;
    }
    debug!("extracting INFO/{} ({:?}) over {}", tag, expected, region);

    let mut rows = Vec::new();
    for record in source.query(region, &VariantFields::info(tag))? {
        let record = record?;

        let Some(field) = record.info_field(tag) else {
            match options.on_missing {
                MissingFieldPolicy::Fail => {
                    return Err(HtsrError::FieldNotFound {
                        tag: tag.to_string(),
                        contig: record.contig,
                        position: record.position,
                    });
                }
                MissingFieldPolicy::Null => {
                    rows.push(InfoRow {
                        chrom: record.contig,
                        pos: record.position,
                        value: None,
                    });
                    continue;
                }
            }
        };

        if field.arity() != 1 {
            return Err(HtsrError::UnsupportedArity {
                tag: tag.to_string(),
                arity: field.arity(),
                contig: record.contig.clone(),
                position: record.position,
            });
        }

        let value = match &field.values[0] {
            InfoValue::Missing => None,
            InfoValue::Integer(n) => Some(InfoScalar::Integer(*n)),
            InfoValue::Float(x) => Some(InfoScalar::Float(*x)),
            InfoValue::Character(_) => {
                check_supported(tag, InfoKind::Character, region)?;
                None
            }
            InfoValue::String(_) => {
                check_supported(tag, InfoKind::String, region)?;
                None
            }
        };

        if let (Some(expected), Some(found)) = (expected, field.values[0].kind()) {
            if expected != found {
                return Err(HtsrError::InfoTypeMismatch {
                    tag: tag.to_string(),
                    expected,
                    found,
                    contig: record.contig.clone(),
                    position: record.position,
                });
            }
        }

        rows.push(InfoRow {
            chrom: record.contig,
            pos: record.position,
            value,
        });
    }
    debug!("{} INFO rows", rows.len());

    Ok(InfoTable {
        tag: tag.to_string(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use htsr_core::models::{InfoField, VariantRecord};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::testing::MemoryVariants;

    #[fixture]
    fn depths() -> MemoryVariants {
        MemoryVariants::new(
            &["NA1"],
            vec![
                VariantRecord::new("1", 10).with_info("DP", InfoField::scalar(InfoValue::Integer(14))),
                VariantRecord::new("1", 20).with_info("DP", InfoField::scalar(InfoValue::Missing)),
                VariantRecord::new("1", 30).with_info("DP", InfoField::scalar(InfoValue::Integer(3))),
                VariantRecord::new("2", 10).with_info("DP", InfoField::scalar(InfoValue::Integer(99))),
            ],
        )
    }

    fn region(s: &str) -> RegionSpec {
        RegionSpec::parse(s).unwrap()
    }

    #[rstest]
    fn test_extract_integer_field(mut depths: MemoryVariants) {
        let table = extract_info(&mut depths, &region("1:1-100"), "DP", &InfoOptions::default()).unwrap();
        assert_eq!(table.tag, "DP");
        assert_eq!(
            table.rows,
            vec![
                InfoRow {
                    chrom: "1".to_string(),
                    pos: 10,
                    value: Some(InfoScalar::Integer(14))
                },
                InfoRow {
                    chrom: "1".to_string(),
                    pos: 20,
                    value: None
                },
                InfoRow {
                    chrom: "1".to_string(),
                    pos: 30,
                    value: Some(InfoScalar::Integer(3))
                },
            ]
        );
    }

    #[rstest]
    fn test_extract_float_field() {
        let mut source = MemoryVariants::new(
            &[],
            vec![VariantRecord::new("1", 5).with_info("AF", InfoField::scalar(InfoValue::Float(0.25)))],
        );
        let table = extract_info(&mut source, &region("1:1-10"), "AF", &InfoOptions::default()).unwrap();
        assert_eq!(table.rows[0].value, Some(InfoScalar::Float(0.25)));
    }

    #[rstest]
    fn test_missing_tag_fails_by_default(mut depths: MemoryVariants) {
        let result = extract_info(&mut depths, &region("1:1-100"), "MQ", &InfoOptions::default());
        match result {
            Err(HtsrError::FieldNotFound { tag, contig, position }) => {
                assert_eq!(tag, "MQ");
                assert_eq!(contig, "1");
                assert_eq!(position, 10);
            }
            other => panic!("expected FieldNotFound, got {:?}", other),
        }
    }

    #[rstest]
    fn test_missing_tag_as_null(mut depths: MemoryVariants) {
        let options = InfoOptions {
            on_missing: MissingFieldPolicy::Null,
            ..Default::default()
        };
        let table = extract_info(&mut depths, &region("1:1-100"), "MQ", &options).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows.iter().all(|r| r.value.is_none()));
    }

    #[rstest]
    fn test_multi_valued_field_is_rejected() {
        let mut source = MemoryVariants::new(
            &[],
            vec![VariantRecord::new("1", 5).with_info(
                "AC",
                InfoField {
                    values: vec![InfoValue::Integer(1), InfoValue::Integer(2)],
                },
            )],
        );
        let result = extract_info(&mut source, &region("1:1-10"), "AC", &InfoOptions::default());
        assert!(matches!(result, Err(HtsrError::UnsupportedArity { arity: 2, .. })));
    }

    #[rstest]
    fn test_flag_is_rejected() {
        let mut source = MemoryVariants::new(
            &[],
            vec![VariantRecord::new("1", 5).with_info("DB", InfoField::flag())],
        );
        let result = extract_info(&mut source, &region("1:1-10"), "DB", &InfoOptions::default());
        assert!(matches!(result, Err(HtsrError::UnsupportedArity { arity: 0, .. })));
    }

    #[rstest]
    fn test_string_field_is_not_implemented() {
        let mut source = MemoryVariants::new(
            &[],
            vec![VariantRecord::new("1", 5).with_info(
                "ANN",
                InfoField::scalar(InfoValue::String("missense".to_string())),
            )],
        );
        let result = extract_info(&mut source, &region("1:1-10"), "ANN", &InfoOptions::default());
        assert!(matches!(result, Err(HtsrError::NotImplemented(_))));
    }

    #[rstest]
    fn test_declared_string_fails_before_reading(mut depths: MemoryVariants) {
        depths.declared.insert("DP".to_string(), InfoKind::String);
        depths.fail_after = Some(0);
        let result = extract_info(&mut depths, &region("1:1-100"), "DP", &InfoOptions::default());
        assert!(matches!(result, Err(HtsrError::NotImplemented(_))));
    }

    #[rstest]
    fn test_kind_mismatch_against_header(mut depths: MemoryVariants) {
        depths.declared.insert("DP".to_string(), InfoKind::Float);
        let result = extract_info(&mut depths, &region("1:1-100"), "DP", &InfoOptions::default());
        assert!(matches!(
            result,
            Err(HtsrError::InfoTypeMismatch {
                expected: InfoKind::Float,
                found: InfoKind::Integer,
                position: 10,
                ..
            })
        ));
    }

    #[rstest]
    fn test_expected_kind_overrides_header(mut depths: MemoryVariants) {
        depths.declared.insert("DP".to_string(), InfoKind::Float);
        let options = InfoOptions {
            expected: Some(InfoKind::Integer),
            ..Default::default()
        };
        let table = extract_info(&mut depths, &region("1:1-100"), "DP", &options).unwrap();
        assert_eq!(table.rows.len(), 3);
    }

    #[rstest]
    fn test_mixed_kinds_are_tagged_per_row() {
        let mut source = MemoryVariants::new(
            &[],
            vec![
                VariantRecord::new("1", 1).with_info("X", InfoField::scalar(InfoValue::Integer(1))),
                VariantRecord::new("1", 2).with_info("X", InfoField::scalar(InfoValue::Float(1.5))),
            ],
        );
        let table = extract_info(&mut source, &region("1:1-10"), "X", &InfoOptions::default()).unwrap();
        assert_eq!(table.rows[0].value, Some(InfoScalar::Integer(1)));
        assert_eq!(table.rows[1].value, Some(InfoScalar::Float(1.5)));
    }

    #[rstest]
    fn test_stream_failure_aborts(mut depths: MemoryVariants) {
        depths.fail_after = Some(2);
        let result = extract_info(&mut depths, &region("1:1-100"), "DP", &InfoOptions::default());
        assert!(matches!(result, Err(HtsrError::Io(_))));
    }

    #[rstest]
    fn test_policy_from_toml_names() {
        let policy: MissingFieldPolicy = serde_json::from_str(r#""null""#).unwrap();
        assert_eq!(policy, MissingFieldPolicy::Null);
    }
}
