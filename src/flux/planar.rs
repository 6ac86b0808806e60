//! Planar advection-diffusion flux between gas-phase control volumes.
//!
//! At the interface between nodes 1 and 2 the species mass flux combines
//! Darcy advection and Fickian diffusion, evaluated with boundary-weighted
//! averages of the two node properties:
//!
//! J_conv = -ρ_k · K_g · (P₂ - P₁) · (1/dy) / μ
//!
//! J_diff = -(ε/τ²) · D_k · ρ · (Y₂ - Y₁) · (1/dy)
//!
//! where every averaged quantity is x = wt₁·x₁ + wt₂·x₂.
//!
//! # Sign Convention
//!
//! A positive component is a net flux of that species from node 1 into
//! node 2.
//!
//! # Units
//!
//! - Permeability K_g: m² (with pressure in Pa)
//! - Inverse spacing 1/dy: 1/m
//! - Output: kg/(m²·s)

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::FluxError;
use crate::properties::{GasProperties, TransportProperties};
use crate::types::{SpeciesVector, ThermoState};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Allowed deviation of wt₁ + wt₂ from one.
const WEIGHT_SUM_TOL: f64 = 1e-12;

/// Geometric and material coefficients of one planar interface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarFluxParameters {
    /// Averaging weight of node 1 (-)
    pub wt1: f64,
    /// Averaging weight of node 2 (-)
    pub wt2: f64,
    /// Gas-phase permeability K_g (m²)
    pub permeability: f64,
    /// Inverse node spacing 1/dy (1/m)
    pub inv_dy: f64,
    /// Porosity over tortuosity squared ε/τ² (-)
    pub eps_tau2: f64,
}

impl PlanarFluxParameters {
    /// Coefficients with explicit averaging weights.
    ///
    /// Weights must be finite, within [0, 1], and sum to one.
    pub fn new(
        wt1: f64,
        wt2: f64,
        permeability: f64,
        inv_dy: f64,
        eps_tau2: f64,
    ) -> Result<Self, FluxError> {
        let params = Self {
            wt1,
            wt2,
            permeability,
            inv_dy,
            eps_tau2,
        };
        params.validate()?;
        Ok(params)
    }

    /// Coefficients for an interface inside one material domain.
    ///
    /// Both weights are 0.5, so averages are arithmetic means.
    pub fn interior(permeability: f64, inv_dy: f64, eps_tau2: f64) -> Self {
        Self {
            wt1: 0.5,
            wt2: 0.5,
            permeability,
            inv_dy,
            eps_tau2,
        }
    }

    /// The same interface seen from node 2.
    pub fn swapped(&self) -> Self {
        Self {
            wt1: self.wt2,
            wt2: self.wt1,
            ..*self
        }
    }

    /// Check the construction rules.
    pub fn validate(&self) -> Result<(), FluxError> {
        for (name, w) in [("wt1", self.wt1), ("wt2", self.wt2)] {
            if !(w.is_finite() && (0.0..=1.0).contains(&w)) {
                return Err(FluxError::invalid_parameter(
                    name,
                    format!("weight {w} not in [0, 1]"),
                ));
            }
        }
        let sum = self.wt1 + self.wt2;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOL {
            return Err(FluxError::invalid_parameter(
                "wt1",
                format!("weights sum to {sum}, expected 1"),
            ));
        }
        if !(self.permeability.is_finite() && self.permeability >= 0.0) {
            return Err(FluxError::invalid_parameter(
                "permeability",
                format!("{} must be non-negative", self.permeability),
            ));
        }
        if !(self.inv_dy.is_finite() && self.inv_dy > 0.0) {
            return Err(FluxError::invalid_parameter(
                "inv_dy",
                format!("{} must be positive", self.inv_dy),
            ));
        }
        if !(self.eps_tau2.is_finite() && self.eps_tau2 >= 0.0) {
            return Err(FluxError::invalid_parameter(
                "eps_tau2",
                format!("{} must be non-negative", self.eps_tau2),
            ));
        }
        Ok(())
    }
}

/// Compute the species mass flux across a planar interface.
///
/// Queries `provider` at both node states and combines the snapshots with
/// [`planar_flux_from_properties`].
///
/// # Arguments
/// * `state1` - State of node 1
/// * `state2` - State of node 2
/// * `provider` - Gas property provider
/// * `params` - Interface coefficients
/// * `enable` - When false the exact zero vector is returned and the
///   provider is not consulted
///
/// # Returns
/// Mass flux of each species (kg/(m²·s)), positive from node 1 into node 2.
///
/// # Errors
/// [`FluxError::InvalidState`] if the provider rejects either state.
///
/// # Example
/// ```
/// use pemfc_transport::flux::{PlanarFluxParameters, planar_advection_diffusion_flux};
/// use pemfc_transport::properties::IdealGasMixture;
/// use pemfc_transport::types::ThermoState;
///
/// let gas = IdealGasMixture::cathode_gas();
/// let params = PlanarFluxParameters::interior(1e-12, 1e4, 0.4);
///
/// // Channel side and humid catalyst side
/// let channel = ThermoState::new(353.15, 1.0, [0.21, 0.69, 0.10]);
/// let electrode = ThermoState::new(353.15, 1.0, [0.15, 0.69, 0.16]);
///
/// let flux = planar_advection_diffusion_flux(&channel, &electrode, &gas, &params, true).unwrap();
/// assert!(flux[2] < 0.0); // product water leaves toward the channel
/// ```
pub fn planar_advection_diffusion_flux<P>(
    state1: &ThermoState,
    state2: &ThermoState,
    provider: &P,
    params: &PlanarFluxParameters,
    enable: bool,
) -> Result<SpeciesVector, FluxError>
where
    P: TransportProperties + ?Sized,
{
    if !enable {
        return Ok(SpeciesVector::zeros(provider.n_species()));
    }

    let props1 = provider.properties_at(state1)?;
    let props2 = provider.properties_at(state2)?;
    planar_flux_from_properties(&props1, &props2, params)
}

/// Combine two property snapshots into the interface flux.
///
/// Same arithmetic as [`planar_advection_diffusion_flux`] for callers that
/// already hold the node snapshots.
pub fn planar_flux_from_properties(
    props1: &GasProperties,
    props2: &GasProperties,
    params: &PlanarFluxParameters,
) -> Result<SpeciesVector, FluxError> {
    let n = props1.n_species();
    for len in [
        props2.n_species(),
        props1.diffusion_coefficients.len(),
        props2.diffusion_coefficients.len(),
    ] {
        if len != n {
            debug!(expected = n, actual = len, "species count mismatch in planar flux");
            return Err(FluxError::SpeciesCountMismatch {
                left: n,
                right: len,
            });
        }
    }

    let PlanarFluxParameters {
        wt1,
        wt2,
        permeability: k_g,
        inv_dy,
        eps_tau2,
    } = *params;

    // Boundary-averaged bulk properties
    let rho = wt1 * props1.density + wt2 * props2.density;
    let mu = wt1 * props1.viscosity + wt2 * props2.viscosity;
    let dp = props2.pressure - props1.pressure;

    let d1 = props1.diffusion_coefficients.as_slice();
    let d2 = props2.diffusion_coefficients.as_slice();
    let y1 = props1.mass_fractions.as_slice();
    let y2 = props2.mass_fractions.as_slice();

    Ok((0..n)
        .map(|k| {
            let d_k = wt1 * d1[k] + wt2 * d2[k];
            let rho_k = wt1 * (props1.density * y1[k]) + wt2 * (props2.density * y2[k]);

            let j_conv = -rho_k * k_g * dp * inv_dy / mu;
            let j_diff = -eps_tau2 * d_k * rho * (y2[k] - y1[k]) * inv_dy;

            j_conv + j_diff
        })
        .collect())
}

fn check_column_shape(
    states: &[ThermoState],
    params: &[PlanarFluxParameters],
) -> Result<usize, FluxError> {
    let n_interfaces = states.len().saturating_sub(1);
    if params.len() != n_interfaces {
        return Err(FluxError::invalid_parameter(
            "params",
            format!(
                "{} parameter sets for {} states (expected {n_interfaces})",
                params.len(),
                states.len()
            ),
        ));
    }
    Ok(n_interfaces)
}

/// Evaluate every interface of a 1-D column of control volumes.
///
/// Interface `i` lies between `states[i]` (node 1) and `states[i + 1]`
/// (node 2) and uses `params[i]`. Each node is queried once.
///
/// # Errors
/// - [`FluxError::InvalidParameter`] if `params.len() != states.len() - 1`
/// - [`FluxError::InvalidState`] if any node state is rejected
pub fn planar_column_fluxes<P>(
    states: &[ThermoState],
    provider: &P,
    params: &[PlanarFluxParameters],
    enable: bool,
) -> Result<Vec<SpeciesVector>, FluxError>
where
    P: TransportProperties + ?Sized,
{
    let n_interfaces = check_column_shape(states, params)?;
    trace!(n_interfaces, enable, "planar column fluxes");

    if !enable {
        return Ok(vec![SpeciesVector::zeros(provider.n_species()); n_interfaces]);
    }

    let snapshots = states
        .iter()
        .map(|s| provider.properties_at(s))
        .collect::<Result<Vec<_>, _>>()?;

    snapshots
        .windows(2)
        .zip(params)
        .map(|(pair, p)| planar_flux_from_properties(&pair[0], &pair[1], p))
        .collect()
}

/// Parallel version of [`planar_column_fluxes`] using rayon.
///
/// Results are identical to the sequential version. Enable with the
/// `parallel` feature.
#[cfg(feature = "parallel")]
pub fn planar_column_fluxes_parallel<P>(
    states: &[ThermoState],
    provider: &P,
    params: &[PlanarFluxParameters],
    enable: bool,
) -> Result<Vec<SpeciesVector>, FluxError>
where
    P: TransportProperties + Sync + ?Sized,
{
    let n_interfaces = check_column_shape(states, params)?;
    trace!(n_interfaces, enable, "planar column fluxes (parallel)");

    if !enable {
        return Ok(vec![SpeciesVector::zeros(provider.n_species()); n_interfaces]);
    }

    let snapshots = states
        .par_iter()
        .map(|s| provider.properties_at(s))
        .collect::<Result<Vec<_>, _>>()?;

    snapshots
        .par_windows(2)
        .zip(params.par_iter())
        .map(|(pair, p)| planar_flux_from_properties(&pair[0], &pair[1], p))
        .collect()
}
