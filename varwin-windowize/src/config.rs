use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use varwin_core::models::WindowTable;

use crate::errors::{ConfigError, ConfigResult};

/// What to do with a coordinate that lies past the last window of the table.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutOfRangePolicy {
    /// Abort the aggregation with `WindowError::OutOfRange`.
    #[default]
    Fail,
    /// Skip the coordinate (clip intervals to the covered span) and log it.
    Drop,
}

/// How variant positions are assigned to windows.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VariantBinning {
    /// Forward-only cursor that advances at most one window per position.
    /// Requires ascending, densely spaced input; a position jumping over more
    /// than one window boundary lands in the next window only.
    #[default]
    SingleStep,
    /// Each position goes to window `(p - 1) / window_size`. Order independent.
    Direct,
}

impl FromStr for OutOfRangePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(OutOfRangePolicy::Fail),
            "drop" => Ok(OutOfRangePolicy::Drop),
            _ => Err(ConfigError::InvalidValue {
                field: "out_of_range",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for VariantBinning {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "single-step" | "single_step" => Ok(VariantBinning::SingleStep),
            "direct" => Ok(VariantBinning::Direct),
            _ => Err(ConfigError::InvalidValue {
                field: "variant_binning",
                value: s.to_string(),
            }),
        }
    }
}

///
/// Settings for one windowize invocation.
///
/// ```toml
/// window_size = 1000
/// max_bp = 50000
/// out_of_range = "drop"
/// variant_binning = "direct"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowizeConfig {
    pub window_size: u32,
    pub max_bp: Option<u32>,
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
    #[serde(default)]
    pub variant_binning: VariantBinning,
}

impl WindowizeConfig {
    pub fn new(window_size: u32) -> Self {
        WindowizeConfig {
            window_size,
            max_bp: None,
            out_of_range: OutOfRangePolicy::default(),
            variant_binning: VariantBinning::default(),
        }
    }

    ///
    /// Build the window table for this configuration.
    ///
    /// # Arguments
    /// - inferred_max_bp: extent of the inputs, used when `max_bp` is not set
    ///
    pub fn window_table(&self, inferred_max_bp: Option<u32>) -> ConfigResult<WindowTable> {
        let max_bp = self
            .max_bp
            .or(inferred_max_bp)
            .ok_or(ConfigError::MissingMaxBp)?;
        Ok(WindowTable::build(self.window_size, max_bp)?)
    }
}

impl TryFrom<&Path> for WindowizeConfig {
    type Error = ConfigError;

    fn try_from(value: &Path) -> ConfigResult<Self> {
        let toml_str = read_to_string(value)?;
        let config: WindowizeConfig = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_config_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_size = 1000").unwrap();
        writeln!(file, "max_bp = 50000").unwrap();
        writeln!(file, "out_of_range = \"drop\"").unwrap();
        writeln!(file, "variant_binning = \"direct\"").unwrap();

        let config = WindowizeConfig::try_from(file.path()).unwrap();
        assert_eq!(
            config,
            WindowizeConfig {
                window_size: 1000,
                max_bp: Some(50000),
                out_of_range: OutOfRangePolicy::Drop,
                variant_binning: VariantBinning::Direct,
            }
        );
    }

    #[rstest]
    fn test_config_defaults() {
        let config: WindowizeConfig = toml::from_str("window_size = 10").unwrap();
        assert_eq!(config, WindowizeConfig::new(10));
    }

    #[rstest]
    fn test_config_rejects_unknown_policy() {
        let result: Result<WindowizeConfig, _> =
            toml::from_str("window_size = 10\nout_of_range = \"clamp\"");
        assert!(result.is_err());
    }

    #[rstest]
    #[case("fail", OutOfRangePolicy::Fail)]
    #[case("DROP", OutOfRangePolicy::Drop)]
    fn test_policy_from_str(#[case] input: &str, #[case] expected: OutOfRangePolicy) {
        assert_eq!(input.parse::<OutOfRangePolicy>().unwrap(), expected);
    }

    #[rstest]
    #[case("single-step", VariantBinning::SingleStep)]
    #[case("direct", VariantBinning::Direct)]
    fn test_binning_from_str(#[case] input: &str, #[case] expected: VariantBinning) {
        assert_eq!(input.parse::<VariantBinning>().unwrap(), expected);
    }

    #[rstest]
    fn test_window_table_prefers_explicit_max_bp() {
        let mut config = WindowizeConfig::new(5);
        config.max_bp = Some(10);
        assert_eq!(config.window_table(Some(100)).unwrap().len(), 3);
    }

    #[rstest]
    fn test_window_table_uses_inferred_max_bp() {
        let config = WindowizeConfig::new(5);
        assert_eq!(config.window_table(Some(100)).unwrap().len(), 21);
        assert!(matches!(
            config.window_table(None),
            Err(ConfigError::MissingMaxBp)
        ));
    }

    #[rstest]
    fn test_window_table_rejects_zero_window_size() {
        let config = WindowizeConfig::new(0);
        assert!(matches!(
            config.window_table(Some(10)),
            Err(ConfigError::Window(_))
        ));
    }
}
