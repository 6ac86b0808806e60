//! Gas-phase property providers.
//!
//! The flux kernels never compute thermodynamic or transport properties
//! themselves. They ask a [`TransportProperties`] implementation for an
//! immutable [`GasProperties`] snapshot of each node's state and combine the
//! two snapshots.
//!
//! Querying is a pure operation (`&self`): evaluating one node does not
//! change what another query returns, so a `Sync` provider can be shared by
//! concurrent flux evaluations.
//!
//! # Built-in Providers
//! - [`IdealGasMixture`]: ideal-gas pressure, Wilke viscosity, and
//!   mixture-averaged diffusion coefficients from binary data

mod ideal_gas;

pub use ideal_gas::{IdealGasMixture, MixtureConfig, SpeciesData, GAS_CONSTANT};

use thiserror::Error;

use crate::types::{SpeciesVector, ThermoState};

/// Error raised when a provider cannot represent a thermodynamic state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// Temperature is zero, negative, or not finite.
    #[error("invalid temperature: {0} K")]
    InvalidTemperature(f64),

    /// Density is zero, negative, or not finite.
    #[error("invalid density: {0} kg/m³")]
    InvalidDensity(f64),

    /// Composition has the wrong number of species.
    #[error("expected {expected} mass fractions, got {actual}")]
    SpeciesCountMismatch { expected: usize, actual: usize },

    /// A single mass fraction is negative or not finite.
    #[error("invalid mass fraction {value} for species {species}")]
    InvalidMassFraction { species: usize, value: f64 },

    /// Mass fractions do not sum to one.
    #[error("mass fractions sum to {sum} (tolerance {tolerance})")]
    MassFractionSum { sum: f64, tolerance: f64 },
}

/// Properties of the gas at one thermodynamic state.
///
/// # Units
/// - Diffusion coefficients: m²/s (mixture-averaged, mass based)
/// - Density: kg/m³
/// - Viscosity: Pa·s
/// - Pressure: Pa
#[derive(Clone, Debug, PartialEq)]
pub struct GasProperties {
    /// Mixture diffusion coefficient of each species (m²/s)
    pub diffusion_coefficients: SpeciesVector,
    /// Bulk mass density (kg/m³)
    pub density: f64,
    /// Dynamic viscosity (Pa·s)
    pub viscosity: f64,
    /// Pressure (Pa)
    pub pressure: f64,
    /// Species mass fractions (-)
    pub mass_fractions: SpeciesVector,
}

impl GasProperties {
    /// Number of species in the snapshot.
    #[inline]
    pub fn n_species(&self) -> usize {
        self.mass_fractions.len()
    }

    /// Partial density of each species, ρ·Y_k (kg/m³).
    pub fn partial_densities(&self) -> SpeciesVector {
        self.density * &self.mass_fractions
    }
}

/// Source of gas properties for a given thermodynamic state.
///
/// Implementations must keep a stable species ordering: entry `k` of every
/// returned vector refers to the same species on every call.
///
/// # Implementation Notes
///
/// - Reject states that cannot be represented with a [`StateError`];
///   never clamp silently
/// - `properties_at` must not depend on earlier calls
pub trait TransportProperties {
    /// Number of species known to the provider.
    fn n_species(&self) -> usize;

    /// Evaluate all properties needed by the flux kernels at `state`.
    fn properties_at(&self, state: &ThermoState) -> Result<GasProperties, StateError>;
}

impl<T: TransportProperties + ?Sized> TransportProperties for &T {
    fn n_species(&self) -> usize {
        (**self).n_species()
    }

    fn properties_at(&self, state: &ThermoState) -> Result<GasProperties, StateError> {
        (**self).properties_at(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_densities_from_snapshot() {
        let props = GasProperties {
            diffusion_coefficients: SpeciesVector::from([2e-5, 3e-5]),
            density: 1.2,
            viscosity: 1.8e-5,
            pressure: 101325.0,
            mass_fractions: SpeciesVector::from([0.25, 0.75]),
        };
        let rho_k = props.partial_densities();
        assert_eq!(props.n_species(), 2);
        assert_eq!(rho_k[0], 1.2 * 0.25);
        assert_eq!(rho_k[1], 1.2 * 0.75);
    }

    #[test]
    fn test_state_error_display() {
        let err = StateError::MassFractionSum {
            sum: 0.9,
            tolerance: 1e-6,
        };
        assert!(err.to_string().contains("0.9"));
    }
}
