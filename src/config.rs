//! Build configuration
//!
//! Everything here is rejected at configuration time; a config that makes it
//! into a [`GraphService`](crate::service::GraphService) is known good.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{NavgraphError, NavgraphResult};

/// Candidate-edge length cutoff in map units. Pairs at or beyond this
/// distance are never line-of-sight tested.
pub const DEFAULT_DISTANCE_CUTOFF: f32 = 800.0;

/// Graph generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NavgraphConfig {
    /// Agent clearance radius added around every obstacle.
    #[validate(range(min = 0.0))]
    pub padding: f32,

    /// Maximum candidate edge length (strict upper bound).
    #[validate(range(min = 0.0))]
    pub distance_cutoff: f32,

    /// Patterns admitting source identifiers, e.g. `**/*.tmx`.
    #[validate(length(min = 1, message = "at least one source pattern is required"))]
    pub sources: Vec<String>,

    /// Optional artifact destination; must carry a `.json` extension.
    pub output: Option<PathBuf>,
}

impl Default for NavgraphConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            distance_cutoff: DEFAULT_DISTANCE_CUTOFF,
            sources: vec!["**/*.tmx".to_string()],
            output: None,
        }
    }
}

impl NavgraphConfig {
    /// Validate and return the config, with detailed error reporting.
    pub fn validated(self) -> NavgraphResult<Self> {
        self.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            NavgraphError::InvalidConfig {
                reason: error_details,
            }
        })?;

        if let Some(output) = &self.output {
            if output.extension().and_then(|e| e.to_str()) != Some("json") {
                return Err(NavgraphError::UnsupportedOutputPath {
                    path: output.clone(),
                });
            }
        }

        Ok(self)
    }

    pub fn from_toml_str(contents: &str) -> NavgraphResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validated()
    }

    /// Load and validate a config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> NavgraphResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NavgraphConfig::default().validated().unwrap();
        assert_eq!(config.padding, 0.0);
        assert_eq!(config.distance_cutoff, DEFAULT_DISTANCE_CUTOFF);
        assert_eq!(config.sources, vec!["**/*.tmx".to_string()]);
    }

    #[test]
    fn test_negative_padding_rejected() {
        let config = NavgraphConfig {
            padding: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validated(),
            Err(NavgraphError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_empty_sources_rejected() {
        let config = NavgraphConfig {
            sources: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validated(),
            Err(NavgraphError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_non_json_output_rejected() {
        let config = NavgraphConfig {
            output: Some(PathBuf::from("graph.yaml")),
            ..Default::default()
        };
        assert!(matches!(
            config.validated(),
            Err(NavgraphError::UnsupportedOutputPath { .. })
        ));

        let config = NavgraphConfig {
            output: Some(PathBuf::from("nav/graph.json")),
            ..Default::default()
        };
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = NavgraphConfig::from_toml_str(
            r#"
            padding = 8.0
            distance_cutoff = 400.0
            sources = ["maps/*.tmx"]
            "#,
        )
        .unwrap();

        assert_eq!(config.padding, 8.0);
        assert_eq!(config.distance_cutoff, 400.0);
        assert_eq!(config.sources, vec!["maps/*.tmx".to_string()]);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(NavgraphConfig::from_toml_str("padding = \"a lot\"").is_err());
    }
}
