//! Ideal-gas mixture property provider.
//!
//! Evaluates the properties the flux kernels need from a small set of
//! species data:
//!
//! - Pressure from the ideal gas law: P = ρ R T / W̄, with 1/W̄ = Σ Y_k / W_k
//! - Species viscosity power law: μ_k = μ_ref,k (T / T_ref)^n_k
//! - Mixture viscosity from Wilke's mixing rule
//! - Binary diffusion scaled from reference conditions:
//!   D_kj = D_ref,kj (T / T_ref)^1.75 (P_ref / P)
//! - Mixture-averaged diffusion for mass-fraction gradients:
//!   1 / D_km = Σ_{j≠k} X_j / D_kj + X_k / (1 - Y_k) Σ_{j≠k} Y_j / D_kj
//!   (self-diffusion D_kk for a pure species)
//!
//! # Units
//!
//! - Molar mass: kg/mol
//! - Viscosity: Pa·s
//! - Diffusion coefficients: m²/s
//! - Temperature: K, pressure: Pa

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GasProperties, StateError, TransportProperties};
use crate::config::ConfigError;
use crate::types::{SpeciesVector, ThermoState};

/// Universal gas constant (J/(mol·K)).
pub const GAS_CONSTANT: f64 = 8.314462618;

/// Exponent of the temperature scaling of binary diffusion coefficients.
const DIFFUSION_TEMPERATURE_EXPONENT: f64 = 1.75;

/// Per-species input data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    /// Species name, used only for diagnostics
    pub name: String,
    /// Molar mass (kg/mol)
    pub molar_mass: f64,
    /// Viscosity at the reference temperature (Pa·s)
    pub viscosity_ref: f64,
    /// Power-law exponent of the viscosity temperature dependence
    #[serde(default = "default_viscosity_exponent")]
    pub viscosity_exponent: f64,
}

fn default_viscosity_exponent() -> f64 {
    0.7
}

fn default_reference_temperature() -> f64 {
    300.0
}

fn default_reference_pressure() -> f64 {
    101325.0
}

fn default_mass_fraction_tolerance() -> f64 {
    1e-6
}

/// Serializable description of an ideal-gas mixture.
///
/// `binary_diffusion[k][j]` is the binary diffusion coefficient of the pair
/// (k, j) at `reference_temperature` and `reference_pressure`. The matrix
/// must be square, symmetric, and strictly positive. Diagonal entries are
/// the self-diffusion coefficients used for pure-species states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixtureConfig {
    /// Species in provider order
    pub species: Vec<SpeciesData>,
    /// Binary diffusion coefficients at reference conditions (m²/s)
    pub binary_diffusion: Vec<Vec<f64>>,
    /// Reference temperature for viscosity and diffusion data (K)
    #[serde(default = "default_reference_temperature")]
    pub reference_temperature: f64,
    /// Reference pressure for diffusion data (Pa)
    #[serde(default = "default_reference_pressure")]
    pub reference_pressure: f64,
    /// Allowed deviation of Σ Y_k from one, and of Y_k below zero
    #[serde(default = "default_mass_fraction_tolerance")]
    pub mass_fraction_tolerance: f64,
}

impl MixtureConfig {
    /// Check the mixture description for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.species.len();
        if n == 0 {
            return Err(ConfigError::Missing("mixture.species".to_string()));
        }

        for (k, s) in self.species.iter().enumerate() {
            if !(s.molar_mass.is_finite() && s.molar_mass > 0.0) {
                return Err(ConfigError::invalid_value(
                    format!("mixture.species[{k}].molar_mass"),
                    s.molar_mass,
                    "must be positive",
                ));
            }
            if !(s.viscosity_ref.is_finite() && s.viscosity_ref > 0.0) {
                return Err(ConfigError::invalid_value(
                    format!("mixture.species[{k}].viscosity_ref"),
                    s.viscosity_ref,
                    "must be positive",
                ));
            }
            if !s.viscosity_exponent.is_finite() {
                return Err(ConfigError::invalid_value(
                    format!("mixture.species[{k}].viscosity_exponent"),
                    s.viscosity_exponent,
                    "must be finite",
                ));
            }
        }

        if self.binary_diffusion.len() != n {
            return Err(ConfigError::invalid_value(
                "mixture.binary_diffusion",
                self.binary_diffusion.len(),
                format!("expected {n} rows"),
            ));
        }
        for (k, row) in self.binary_diffusion.iter().enumerate() {
            if row.len() != n {
                return Err(ConfigError::invalid_value(
                    format!("mixture.binary_diffusion[{k}]"),
                    row.len(),
                    format!("expected {n} columns"),
                ));
            }
            for (j, &d) in row.iter().enumerate() {
                if !(d.is_finite() && d > 0.0) {
                    return Err(ConfigError::invalid_value(
                        format!("mixture.binary_diffusion[{k}][{j}]"),
                        d,
                        "must be positive",
                    ));
                }
                if d != self.binary_diffusion[j][k] {
                    return Err(ConfigError::invalid_value(
                        format!("mixture.binary_diffusion[{k}][{j}]"),
                        d,
                        "matrix must be symmetric",
                    ));
                }
            }
        }

        for (key, value) in [
            ("mixture.reference_temperature", self.reference_temperature),
            ("mixture.reference_pressure", self.reference_pressure),
            ("mixture.mass_fraction_tolerance", self.mass_fraction_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid_value(key, value, "must be positive"));
            }
        }

        Ok(())
    }
}

/// Ideal-gas mixture with power-law transport data.
///
/// # Example
///
/// ```
/// use pemfc_transport::properties::{IdealGasMixture, TransportProperties};
/// use pemfc_transport::types::ThermoState;
///
/// let gas = IdealGasMixture::cathode_gas();
///
/// // O2 / N2 / H2O at 80 °C
/// let state = ThermoState::new(353.15, 1.0, [0.2, 0.7, 0.1]);
/// let props = gas.properties_at(&state).unwrap();
/// assert!(props.pressure > 0.0);
/// assert_eq!(props.diffusion_coefficients.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct IdealGasMixture {
    config: MixtureConfig,
}

impl IdealGasMixture {
    /// Build a provider from a validated configuration.
    pub fn from_config(config: MixtureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Humidified cathode gas: O₂, N₂, H₂O (in that order).
    ///
    /// Representative binary diffusion coefficients and viscosities at
    /// 300 K and 1 atm.
    pub fn cathode_gas() -> Self {
        let species = vec![
            SpeciesData {
                name: "O2".to_string(),
                molar_mass: 31.998e-3,
                viscosity_ref: 2.07e-5,
                viscosity_exponent: 0.7,
            },
            SpeciesData {
                name: "N2".to_string(),
                molar_mass: 28.014e-3,
                viscosity_ref: 1.79e-5,
                viscosity_exponent: 0.7,
            },
            SpeciesData {
                name: "H2O".to_string(),
                molar_mass: 18.015e-3,
                viscosity_ref: 1.0e-5,
                viscosity_exponent: 1.1,
            },
        ];
        let binary_diffusion = vec![
            vec![2.1e-5, 2.1e-5, 2.6e-5],
            vec![2.1e-5, 2.0e-5, 2.5e-5],
            vec![2.6e-5, 2.5e-5, 2.4e-5],
        ];
        Self {
            config: MixtureConfig {
                species,
                binary_diffusion,
                reference_temperature: default_reference_temperature(),
                reference_pressure: default_reference_pressure(),
                mass_fraction_tolerance: default_mass_fraction_tolerance(),
            },
        }
    }

    /// The configuration this provider was built from.
    pub fn config(&self) -> &MixtureConfig {
        &self.config
    }

    /// Species names in provider order.
    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.config.species.iter().map(|s| s.name.as_str())
    }

    /// Position of a species by name.
    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.config.species.iter().position(|s| s.name == name)
    }

    fn validate_state(&self, state: &ThermoState) -> Result<(), StateError> {
        let tol = self.config.mass_fraction_tolerance;

        if !(state.temperature.is_finite() && state.temperature > 0.0) {
            debug!(temperature = state.temperature, "rejected state");
            return Err(StateError::InvalidTemperature(state.temperature));
        }
        if !(state.density.is_finite() && state.density > 0.0) {
            debug!(density = state.density, "rejected state");
            return Err(StateError::InvalidDensity(state.density));
        }
        if state.n_species() != self.n_species() {
            debug!(
                expected = self.n_species(),
                actual = state.n_species(),
                "rejected state"
            );
            return Err(StateError::SpeciesCountMismatch {
                expected: self.n_species(),
                actual: state.n_species(),
            });
        }
        if let Some((species, &value)) = state
            .mass_fractions
            .iter()
            .enumerate()
            .find(|&(_, y)| !y.is_finite() || *y < -tol)
        {
            debug!(species, value, "rejected state");
            return Err(StateError::InvalidMassFraction { species, value });
        }
        let sum = state.mass_fractions.sum();
        if (sum - 1.0).abs() > tol {
            debug!(sum, "rejected state");
            return Err(StateError::MassFractionSum {
                sum,
                tolerance: tol,
            });
        }
        Ok(())
    }

    /// Wilke mixing rule for the mixture viscosity.
    fn mixture_viscosity(&self, mole_fractions: &[f64], species_viscosity: &[f64]) -> f64 {
        let species = &self.config.species;
        let n = species.len();
        let mut viscosity = 0.0;
        for k in 0..n {
            if mole_fractions[k] == 0.0 {
                continue;
            }
            let mut denominator = 0.0;
            for j in 0..n {
                let mass_ratio = species[j].molar_mass / species[k].molar_mass;
                let phi = (1.0
                    + (species_viscosity[k] / species_viscosity[j]).sqrt() * mass_ratio.powf(0.25))
                .powi(2)
                    / (8.0 * (1.0 + 1.0 / mass_ratio)).sqrt();
                denominator += mole_fractions[j] * phi;
            }
            viscosity += mole_fractions[k] * species_viscosity[k] / denominator;
        }
        viscosity
    }
}

impl TransportProperties for IdealGasMixture {
    fn n_species(&self) -> usize {
        self.config.species.len()
    }

    fn properties_at(&self, state: &ThermoState) -> Result<GasProperties, StateError> {
        self.validate_state(state)?;

        let cfg = &self.config;
        let species = &cfg.species;
        let n = species.len();
        let t = state.temperature;
        let y = state.mass_fractions.as_slice();

        let inv_mean_molar_mass: f64 = y
            .iter()
            .zip(species)
            .map(|(y_k, s)| y_k / s.molar_mass)
            .sum();
        let pressure = state.density * GAS_CONSTANT * t * inv_mean_molar_mass;

        let mole_fractions: Vec<f64> = y
            .iter()
            .zip(species)
            .map(|(y_k, s)| y_k / s.molar_mass / inv_mean_molar_mass)
            .collect();

        let t_ratio = t / cfg.reference_temperature;
        let species_viscosity: Vec<f64> = species
            .iter()
            .map(|s| s.viscosity_ref * t_ratio.powf(s.viscosity_exponent))
            .collect();
        let viscosity = self.mixture_viscosity(&mole_fractions, &species_viscosity);

        let scale = t_ratio.powf(DIFFUSION_TEMPERATURE_EXPONENT) * (cfg.reference_pressure / pressure);
        let binary = |k: usize, j: usize| cfg.binary_diffusion[k][j] * scale;

        // Coefficients for mass-fraction gradients
        let diffusion_coefficients: SpeciesVector = (0..n)
            .map(|k| {
                let (sum_x, sum_y) = (0..n).filter(|&j| j != k).fold((0.0, 0.0), |(sx, sy), j| {
                    let d_kj = binary(k, j);
                    (sx + mole_fractions[j] / d_kj, sy + y[j] / d_kj)
                });
                if sum_x > 0.0 && y[k] < 1.0 {
                    1.0 / (sum_x + mole_fractions[k] / (1.0 - y[k]) * sum_y)
                } else {
                    binary(k, k)
                }
            })
            .collect();

        Ok(GasProperties {
            diffusion_coefficients,
            density: state.density,
            viscosity,
            pressure,
            mass_fractions: state.mass_fractions.clone(),
        })
    }
}
