use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use htsr_stats::{DepthOptions, InfoOptions};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tsv" => Some(OutputFormat::Tsv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

///
/// Settings read from an optional `htsr.toml`. Every section and key may be
/// left out; command-line flags override whatever is set here.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HtsrConfig {
    pub depth: DepthOptions,
    pub info: InfoOptions,
    pub output: OutputConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl TryFrom<&Path> for HtsrConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use htsr_stats::MissingFieldPolicy;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use std::io::Write;

    #[rstest]
    fn test_full_config() {
        let config: HtsrConfig = toml::from_str(
            r#"
            [depth]
            flank_bp = 500
            exclude_flags = 1796

            [info]
            on_missing = "null"

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.depth.flank_bp, 500);
        assert_eq!(config.depth.exclude_flags, 1796);
        assert_eq!(config.info.on_missing, MissingFieldPolicy::Null);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[rstest]
    fn test_empty_config_is_default() {
        let config: HtsrConfig = toml::from_str("").unwrap();
        assert_eq!(config, HtsrConfig::default());
        assert_eq!(config.info.on_missing, MissingFieldPolicy::Fail);
        assert_eq!(config.depth.flank_bp, 0);
    }

    #[rstest]
    fn test_partial_section() {
        let config: HtsrConfig = toml::from_str("[depth]\nexclude_flags = 4\n").unwrap();
        assert_eq!(config.depth.exclude_flags, 4);
        assert_eq!(config.depth.flank_bp, 0);
    }

    #[rstest]
    fn test_try_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"").unwrap();
        let config = HtsrConfig::try_from(file.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[rstest]
    fn test_bad_policy_is_rejected() {
        let result: Result<HtsrConfig, _> = toml::from_str("[info]\non_missing = \"skip\"\n");
        assert!(result.is_err());
    }

    #[rstest]
    fn test_missing_file() {
        let result = HtsrConfig::try_from(Path::new("/no/such/htsr.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
