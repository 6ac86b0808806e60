//! Thermodynamic node state.

use serde::{Deserialize, Serialize};

use super::SpeciesVector;

/// Temperature, density, and composition of one control volume (TDY).
///
/// # Units
/// - Temperature: K
/// - Density: kg/m³ (bulk gas density)
/// - Mass fractions: dimensionless, one entry per species
///
/// The state is not validated on construction; the property provider
/// decides whether it can represent it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermoState {
    /// Temperature (K)
    pub temperature: f64,
    /// Bulk mass density (kg/m³)
    pub density: f64,
    /// Species mass fractions (-)
    pub mass_fractions: SpeciesVector,
}

impl ThermoState {
    /// Create a new state.
    pub fn new(temperature: f64, density: f64, mass_fractions: impl Into<SpeciesVector>) -> Self {
        Self {
            temperature,
            density,
            mass_fractions: mass_fractions.into(),
        }
    }

    /// Number of species in the composition.
    #[inline]
    pub fn n_species(&self) -> usize {
        self.mass_fractions.len()
    }

    /// Partial density of each species, ρ·Y_k (kg/m³).
    pub fn partial_densities(&self) -> SpeciesVector {
        self.density * &self.mass_fractions
    }
}
