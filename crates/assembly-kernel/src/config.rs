//! Configuration for a kernel run
//!
//! Chooses the assembly mode once for the whole pipeline and tunes the
//! reporting of common sections.

use assembly_domain::probability::DEFAULT_NEGLIGIBLE_DIFFERENCE;
use assembly_domain::AssemblyMode;
use serde::{Deserialize, Serialize};

/// Configuration of the [`AssessmentSectionAssembler`](crate::AssessmentSectionAssembler)
///
/// # Examples
///
/// ```
/// use assembly_domain::AssemblyMode;
/// use assembly_kernel::KernelConfig;
///
/// // Default configuration: full assembly
/// let config = KernelConfig::default();
/// assert_eq!(config.mode, AssemblyMode::Full);
///
/// // Partial assembly while assessments are still running
/// let config = KernelConfig::partial();
/// assert_eq!(config.mode, AssemblyMode::Partial);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Full or partial treatment of unassessed sections and mechanisms
    /// Default: full
    #[serde(default)]
    pub mode: AssemblyMode,

    /// Relative reliability-index difference below which two probabilities
    /// count as equal when merging common sections
    /// Default: 1e-6
    #[serde(default = "default_negligible_difference")]
    pub negligible_difference: f64,

    /// Report merged combined common sections instead of the full refinement
    /// Default: false
    #[serde(default)]
    pub merge_adjacent_common_sections: bool,
}

fn default_negligible_difference() -> f64 {
    DEFAULT_NEGLIGIBLE_DIFFERENCE
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl KernelConfig {
    /// Full assembly: any unassessed input yields "no judgement possible"
    pub fn full() -> Self {
        Self {
            mode: AssemblyMode::Full,
            negligible_difference: DEFAULT_NEGLIGIBLE_DIFFERENCE,
            merge_adjacent_common_sections: false,
        }
    }

    /// Partial assembly: unassessed inputs are left out
    pub fn partial() -> Self {
        Self {
            mode: AssemblyMode::Partial,
            ..Self::full()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.negligible_difference > 0.0 && self.negligible_difference < 1.0) {
            return Err(format!(
                "negligible_difference must be in (0, 1), got {}",
                self.negligible_difference
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = KernelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config, KernelConfig::full());
        assert!(!config.merge_adjacent_common_sections);
    }

    #[test]
    fn test_partial_config_is_valid() {
        let config = KernelConfig::partial();
        assert!(config.validate().is_ok());
        assert!(config.mode.is_partial());
    }

    #[test]
    fn test_invalid_negligible_difference() {
        for value in [0.0, 1.0, -0.1, f64::NAN] {
            let config = KernelConfig {
                negligible_difference: value,
                ..KernelConfig::default()
            };
            assert!(config.validate().is_err(), "{value} accepted");
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = KernelConfig {
            merge_adjacent_common_sections: true,
            ..KernelConfig::partial()
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = KernelConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = KernelConfig::from_toml(r#"mode = "partial""#).unwrap();
        assert_eq!(config.mode, AssemblyMode::Partial);
        assert_eq!(config.negligible_difference, DEFAULT_NEGLIGIBLE_DIFFERENCE);
        assert!(!config.merge_adjacent_common_sections);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(KernelConfig::from_toml("mode = 3").is_err());
    }
}
