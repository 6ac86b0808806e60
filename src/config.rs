//! Loadable kernel configuration.
//!
//! Bundles everything a driver needs to set up the flux kernels for one
//! cell: the gas mixture description and the planar and radial coefficient
//! sets. Stored as JSON.
//!
//! # Example
//! ```
//! use pemfc_transport::config::TransportConfig;
//!
//! let json = r#"{
//!     "mixture": {
//!         "species": [{"name": "N2", "molar_mass": 0.028014, "viscosity_ref": 1.79e-5}],
//!         "binary_diffusion": [[2.0e-5]]
//!     },
//!     "planar": {"wt1": 0.5, "wt2": 0.5, "permeability": 1e-12, "inv_dy": 100.0, "eps_tau2": 0.5}
//! }"#;
//!
//! let config = TransportConfig::from_json(json).unwrap();
//! assert!(config.radial.is_none());
//! let gas = config.build_mixture().unwrap();
//! ```

use std::fmt::Display;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::flux::{PlanarFluxParameters, RadialFluxParameters};
use crate::properties::{IdealGasMixture, MixtureConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or written.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is out of its allowed range.
    #[error("Invalid value '{key}': {value} - {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A required entry is absent.
    #[error("Missing entry: {0}")]
    Missing(String),
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Complete kernel setup for one cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Gas mixture used by the planar kernel
    pub mixture: MixtureConfig,
    /// Planar interface coefficients
    pub planar: PlanarFluxParameters,
    /// Agglomerate coefficients, absent when no radial sub-model is used
    #[serde(default)]
    pub radial: Option<RadialFluxParameters>,
}

impl TransportConfig {
    /// Parse and validate a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TransportConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        info!(
            path = %path.as_ref().display(),
            n_species = config.mixture.species.len(),
            radial = config.radial.is_some(),
            "loaded transport configuration"
        );
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mixture.validate()?;
        self.planar
            .validate()
            .map_err(|e| ConfigError::invalid_value("planar", "<parameters>", e.to_string()))?;
        if let Some(radial) = &self.radial {
            radial
                .validate()
                .map_err(|e| ConfigError::invalid_value("radial", "<parameters>", e.to_string()))?;
        }
        Ok(())
    }

    /// Build the gas mixture provider.
    pub fn build_mixture(&self) -> Result<IdealGasMixture, ConfigError> {
        IdealGasMixture::from_config(self.mixture.clone())
    }
}
