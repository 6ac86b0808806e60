//! Radial shell diffusion inside spherical agglomerates.
//!
//! Finite-difference approximation of the diffusive transfer between two
//! radially adjacent shells j (outer) and j+1 (inner), evaluated at the
//! shell interface r_{j+1/2}:
//!
//! ṁ = D_eff · p_eff · (ε/τ²) · r²_{j+1/2} · (ρ_k,outer - ρ_k,inner) · (1/Δr)
//!
//! The flooded-agglomerate model divides by the shell volume measure to get
//! a density rate:
//!
//! ∂ρ/∂t = ṁ · (1/r_j)² · (1/t_shl)
//!
//! # Sign Convention
//!
//! Positive output is a net transfer from the outer shell into the inner
//! shell.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::FluxError;
use crate::types::{NodeIndex, SpeciesVector};

/// Radial sub-model selecting the units of the returned rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialVariant {
    /// Lumped core-shell model: rate of mass change (kg/s)
    #[default]
    CoreShell,
    /// Distributed flooded-agglomerate model: rate of density change (kg/(m³·s))
    FloodedAgglomerate,
}

impl RadialVariant {
    /// Human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            RadialVariant::CoreShell => "core_shell",
            RadialVariant::FloodedAgglomerate => "flooded_agglomerate",
        }
    }

    /// Units of the rate returned for this variant.
    pub fn units(&self) -> &'static str {
        match self {
            RadialVariant::CoreShell => "kg/s",
            RadialVariant::FloodedAgglomerate => "kg/(m³·s)",
        }
    }

    /// Legacy integer selector (1 or 2).
    pub fn selector(&self) -> i32 {
        match self {
            RadialVariant::CoreShell => 1,
            RadialVariant::FloodedAgglomerate => 2,
        }
    }
}

impl fmt::Display for RadialVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for RadialVariant {
    type Error = FluxError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RadialVariant::CoreShell),
            2 => Ok(RadialVariant::FloodedAgglomerate),
            _ => Err(FluxError::InvalidVariant(value)),
        }
    }
}

/// Coefficients of a radially discretized agglomerate.
///
/// The per-node arrays are indexed by [`NodeIndex`]; node j holds the
/// geometry of the interface between shells j and j+1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadialFluxParameters {
    /// Effective diffusion coefficient in the ionomer (m²/s)
    pub d_eff_naf: f64,
    /// Effective ionomer surface-area fraction (-)
    pub p_eff_sa_naf: f64,
    /// Ionomer volume fraction over tortuosity squared of the inner shell (-)
    pub eps_tau2_n2: f64,
    /// Interface radius r_{j+1/2} (m)
    pub r_jph: Vec<f64>,
    /// Inverse distance between shell centres 1/Δr (1/m)
    pub inv_dr: Vec<f64>,
    /// Inverse shell-centre radius 1/r_j (1/m), flooded-agglomerate only
    #[serde(default)]
    pub inv_r_j: Vec<f64>,
    /// Inverse shell thickness 1/t_shl (1/m), flooded-agglomerate only
    #[serde(default)]
    pub inv_t_shl: Vec<f64>,
}

impl RadialFluxParameters {
    /// Number of nodes with interface geometry.
    pub fn n_nodes(&self) -> usize {
        self.r_jph.len()
    }

    /// Whether every array needed by `variant` is present.
    pub fn supports(&self, variant: RadialVariant) -> bool {
        match variant {
            RadialVariant::CoreShell => true,
            RadialVariant::FloodedAgglomerate => {
                !self.inv_r_j.is_empty() && !self.inv_t_shl.is_empty()
            }
        }
    }

    /// Check array lengths and finiteness.
    pub fn validate(&self) -> Result<(), FluxError> {
        for (name, value) in [
            ("d_eff_naf", self.d_eff_naf),
            ("p_eff_sa_naf", self.p_eff_sa_naf),
            ("eps_tau2_n2", self.eps_tau2_n2),
        ] {
            if !value.is_finite() {
                return Err(FluxError::invalid_parameter(name, format!("{value} is not finite")));
            }
        }

        let n = self.n_nodes();
        if n == 0 {
            return Err(FluxError::invalid_parameter("r_jph", "no nodes"));
        }
        if self.inv_dr.len() != n {
            return Err(FluxError::invalid_parameter(
                "inv_dr",
                format!("length {} does not match r_jph length {n}", self.inv_dr.len()),
            ));
        }
        if self.inv_r_j.is_empty() != self.inv_t_shl.is_empty() {
            return Err(FluxError::invalid_parameter(
                "inv_r_j",
                "inv_r_j and inv_t_shl must be given together",
            ));
        }
        for (name, array) in [("inv_r_j", &self.inv_r_j), ("inv_t_shl", &self.inv_t_shl)] {
            if !array.is_empty() && array.len() != n {
                return Err(FluxError::invalid_parameter(
                    name,
                    format!("length {} does not match r_jph length {n}", array.len()),
                ));
            }
        }
        for (name, array) in [
            ("r_jph", &self.r_jph),
            ("inv_dr", &self.inv_dr),
            ("inv_r_j", &self.inv_r_j),
            ("inv_t_shl", &self.inv_t_shl),
        ] {
            if let Some(v) = array.iter().find(|v| !v.is_finite()) {
                return Err(FluxError::invalid_parameter(name, format!("{v} is not finite")));
            }
        }
        Ok(())
    }
}

/// Bounds-checked lookup into a per-node array.
fn node_value(array: &'static str, values: &[f64], node: NodeIndex) -> Result<f64, FluxError> {
    values.get(node.get()).copied().ok_or_else(|| {
        debug!(array, %node, len = values.len(), "node index out of range");
        FluxError::IndexOutOfRange {
            array,
            index: node.get(),
            len: values.len(),
        }
    })
}

/// Lookup into a flooded-agglomerate array.
///
/// The arrays may be omitted for core-shell parameter sets. When they are
/// given, `node` must be in range for every variant.
fn flooded_node_value(
    array: &'static str,
    values: &[f64],
    node: NodeIndex,
    variant: RadialVariant,
) -> Result<f64, FluxError> {
    if values.is_empty() && variant == RadialVariant::CoreShell {
        return Ok(0.0);
    }
    node_value(array, values, node)
}

/// Compute the diffusive transfer rate between two adjacent shells.
///
/// # Arguments
/// * `rho_k1` - Species partial densities of the outer shell (kg/m³)
/// * `rho_k2` - Species partial densities of the inner shell (kg/m³)
/// * `params` - Agglomerate coefficients
/// * `node` - Interface whose geometry is used
/// * `variant` - Sub-model, see [`RadialVariant`]
///
/// # Returns
/// Rate per species in the units of `variant`, positive from the outer
/// into the inner shell.
///
/// # Errors
/// - [`FluxError::SpeciesCountMismatch`] if the density vectors differ in length
/// - [`FluxError::IndexOutOfRange`] if `node` is outside any per-node array in
///   `params`. Empty `inv_r_j`/`inv_t_shl` arrays are skipped for
///   [`RadialVariant::CoreShell`], which does not read them.
///
/// # Example
/// ```
/// use pemfc_transport::flux::{RadialFluxParameters, RadialVariant, radial_shell_diffusion_rate};
/// use pemfc_transport::types::{NodeIndex, SpeciesVector};
///
/// let params = RadialFluxParameters {
///     d_eff_naf: 8.45e-10,
///     p_eff_sa_naf: 1.0,
///     eps_tau2_n2: 0.3,
///     r_jph: vec![100e-9],
///     inv_dr: vec![1.0 / 10e-9],
///     inv_r_j: vec![],
///     inv_t_shl: vec![],
/// };
/// let outer = SpeciesVector::from([2.0]);
/// let inner = SpeciesVector::from([1.0]);
///
/// let rate = radial_shell_diffusion_rate(
///     &outer, &inner, &params, NodeIndex::new(0), RadialVariant::CoreShell,
/// ).unwrap();
/// assert!(rate[0] > 0.0);
/// ```
pub fn radial_shell_diffusion_rate(
    rho_k1: &SpeciesVector,
    rho_k2: &SpeciesVector,
    params: &RadialFluxParameters,
    node: NodeIndex,
    variant: RadialVariant,
) -> Result<SpeciesVector, FluxError> {
    if rho_k1.len() != rho_k2.len() {
        debug!(
            outer = rho_k1.len(),
            inner = rho_k2.len(),
            "species count mismatch in radial rate"
        );
        return Err(FluxError::SpeciesCountMismatch {
            left: rho_k1.len(),
            right: rho_k2.len(),
        });
    }

    let r_jph = node_value("r_jph", &params.r_jph, node)?;
    let inv_dr = node_value("inv_dr", &params.inv_dr, node)?;
    let inv_r_j = flooded_node_value("inv_r_j", &params.inv_r_j, node, variant)?;
    let inv_t_shl = flooded_node_value("inv_t_shl", &params.inv_t_shl, node, variant)?;
    let coeff = params.d_eff_naf * params.p_eff_sa_naf * params.eps_tau2_n2;

    match variant {
        RadialVariant::CoreShell => rho_k1.zip_map(rho_k2, |outer, inner| {
            coeff * (r_jph.powi(2) * (outer - inner) * inv_dr)
        }),
        RadialVariant::FloodedAgglomerate => rho_k1.zip_map(rho_k2, |outer, inner| {
            coeff * (r_jph.powi(2) * (outer - inner) * inv_dr) * inv_r_j.powi(2) * inv_t_shl
        }),
    }
}

/// Evaluate every shell interface of one agglomerate.
///
/// `shells[0]` is the outermost shell. Interface j lies between `shells[j]`
/// and `shells[j + 1]` and uses node j, so the result has
/// `shells.len() - 1` entries.
pub fn radial_profile_rates(
    shells: &[SpeciesVector],
    params: &RadialFluxParameters,
    variant: RadialVariant,
) -> Result<Vec<SpeciesVector>, FluxError> {
    let n_interfaces = shells.len().saturating_sub(1);
    trace!(n_interfaces, variant = variant.name(), "radial profile rates");

    shells
        .windows(2)
        .zip(NodeIndex::iter(n_interfaces))
        .map(|(pair, node)| radial_shell_diffusion_rate(&pair[0], &pair[1], params, node, variant))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    fn agglomerate() -> RadialFluxParameters {
        RadialFluxParameters {
            d_eff_naf: 2.0,
            p_eff_sa_naf: 0.5,
            eps_tau2_n2: 0.25,
            r_jph: vec![3.0, 2.0, 1.0],
            inv_dr: vec![1.0, 2.0, 4.0],
            inv_r_j: vec![0.5, 0.25, 0.125],
            inv_t_shl: vec![2.0, 3.0, 4.0],
        }
    }

    #[test]
    fn test_core_shell_rate() {
        let params = agglomerate();
        let outer = SpeciesVector::from([3.0, 1.0]);
        let inner = SpeciesVector::from([1.0, 1.0]);

        let rate =
            radial_shell_diffusion_rate(&outer, &inner, &params, NodeIndex::new(1), RadialVariant::CoreShell)
                .unwrap();

        // 2 * 0.5 * 0.25 * (2^2 * 2 * 2) = 4
        assert!((rate[0] - 4.0).abs() < TOL);
        assert_eq!(rate[1], 0.0);
    }

    #[test]
    fn test_flooded_agglomerate_rate() {
        let params = agglomerate();
        let outer = SpeciesVector::from([3.0]);
        let inner = SpeciesVector::from([1.0]);

        let rate = radial_shell_diffusion_rate(
            &outer,
            &inner,
            &params,
            NodeIndex::new(1),
            RadialVariant::FloodedAgglomerate,
        )
        .unwrap();

        // 4 * 0.25^2 * 3 = 0.75
        assert!((rate[0] - 0.75).abs() < TOL);
    }

    #[test]
    fn test_variant_consistency() {
        let params = agglomerate();
        let outer = SpeciesVector::from([1.7, 0.3, 2.9]);
        let inner = SpeciesVector::from([0.4, 0.8, 2.1]);

        for node in NodeIndex::iter(params.n_nodes()) {
            let v1 = radial_shell_diffusion_rate(&outer, &inner, &params, node, RadialVariant::CoreShell)
                .unwrap();
            let v2 = radial_shell_diffusion_rate(
                &outer,
                &inner,
                &params,
                node,
                RadialVariant::FloodedAgglomerate,
            )
            .unwrap();

            let factor_rj = params.inv_r_j[node.get()].powi(2);
            let factor_t = params.inv_t_shl[node.get()];
            for k in 0..3 {
                assert_eq!(v2[k], v1[k] * factor_rj * factor_t);
            }
        }
    }

    #[test]
    fn test_antisymmetry() {
        let params = agglomerate();
        let outer = SpeciesVector::from([1.7, 0.3]);
        let inner = SpeciesVector::from([0.4, 0.8]);

        for variant in [RadialVariant::CoreShell, RadialVariant::FloodedAgglomerate] {
            let forward =
                radial_shell_diffusion_rate(&outer, &inner, &params, NodeIndex::ZERO, variant).unwrap();
            let backward =
                radial_shell_diffusion_rate(&inner, &outer, &params, NodeIndex::ZERO, variant).unwrap();
            assert_eq!(forward, -backward);
        }
    }

    #[test]
    fn test_inputs_unchanged() {
        let params = agglomerate();
        let outer = SpeciesVector::from([1.0, 2.0]);
        let inner = SpeciesVector::from([0.5, 0.5]);
        let before = (outer.clone(), inner.clone(), params.clone());

        radial_shell_diffusion_rate(&outer, &inner, &params, NodeIndex::new(2), RadialVariant::CoreShell)
            .unwrap();
        assert_eq!((outer, inner, params), before);
    }

    #[test]
    fn test_node_out_of_range() {
        let params = agglomerate();
        let rho = SpeciesVector::from([1.0]);
        let err = radial_shell_diffusion_rate(&rho, &rho, &params, NodeIndex::new(3), RadialVariant::CoreShell)
            .unwrap_err();
        assert_eq!(
            err,
            FluxError::IndexOutOfRange {
                array: "r_jph",
                index: 3,
                len: 3
            }
        );
    }

    #[test]
    fn test_core_shell_parameters_reject_flooded_variant() {
        let mut params = agglomerate();
        params.inv_r_j.clear();
        params.inv_t_shl.clear();
        assert!(params.supports(RadialVariant::CoreShell));
        assert!(!params.supports(RadialVariant::FloodedAgglomerate));

        let rho = SpeciesVector::from([1.0]);
        let err = radial_shell_diffusion_rate(
            &rho,
            &rho,
            &params,
            NodeIndex::ZERO,
            RadialVariant::FloodedAgglomerate,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FluxError::IndexOutOfRange {
                array: "inv_r_j",
                ..
            }
        ));
    }

    #[test]
    fn test_core_shell_checks_present_flooded_arrays() {
        let mut params = agglomerate();
        params.inv_t_shl.truncate(2);
        let rho = SpeciesVector::from([1.0]);

        assert!(
            radial_shell_diffusion_rate(&rho, &rho, &params, NodeIndex::new(1), RadialVariant::CoreShell)
                .is_ok()
        );
        let err = radial_shell_diffusion_rate(&rho, &rho, &params, NodeIndex::new(2), RadialVariant::CoreShell)
            .unwrap_err();
        assert_eq!(
            err,
            FluxError::IndexOutOfRange {
                array: "inv_t_shl",
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn test_species_count_mismatch() {
        let params = agglomerate();
        let a = SpeciesVector::from([1.0, 2.0]);
        let b = SpeciesVector::from([1.0]);
        assert_eq!(
            radial_shell_diffusion_rate(&a, &b, &params, NodeIndex::ZERO, RadialVariant::CoreShell),
            Err(FluxError::SpeciesCountMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_variant_selector() {
        assert_eq!(RadialVariant::try_from(1), Ok(RadialVariant::CoreShell));
        assert_eq!(RadialVariant::try_from(2), Ok(RadialVariant::FloodedAgglomerate));
        assert_eq!(RadialVariant::try_from(3), Err(FluxError::InvalidVariant(3)));
        assert_eq!(RadialVariant::try_from(0), Err(FluxError::InvalidVariant(0)));

        for v in [RadialVariant::CoreShell, RadialVariant::FloodedAgglomerate] {
            assert_eq!(RadialVariant::try_from(v.selector()), Ok(v));
        }
        assert_eq!(RadialVariant::FloodedAgglomerate.to_string(), "flooded_agglomerate");
    }

    #[test]
    fn test_parameter_validation() {
        assert!(agglomerate().validate().is_ok());

        let mut short = agglomerate();
        short.inv_dr.pop();
        assert!(short.validate().is_err());

        let mut half = agglomerate();
        half.inv_t_shl.clear();
        assert!(half.validate().is_err());

        let mut nan = agglomerate();
        nan.r_jph[1] = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_profile_rates() {
        let params = agglomerate();
        let shells = vec![
            SpeciesVector::from([4.0]),
            SpeciesVector::from([3.0]),
            SpeciesVector::from([1.5]),
            SpeciesVector::from([1.0]),
        ];

        let rates = radial_profile_rates(&shells, &params, RadialVariant::CoreShell).unwrap();
        assert_eq!(rates.len(), 3);
        for (j, rate) in rates.iter().enumerate() {
            let single = radial_shell_diffusion_rate(
                &shells[j],
                &shells[j + 1],
                &params,
                NodeIndex::new(j),
                RadialVariant::CoreShell,
            )
            .unwrap();
            assert_eq!(*rate, single);
            assert!(rate[0] > 0.0);
        }

        // More shells than interface geometry
        let mut too_many = shells.clone();
        too_many.push(SpeciesVector::from([0.5]));
        assert!(matches!(
            radial_profile_rates(&too_many, &params, RadialVariant::CoreShell),
            Err(FluxError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_variant_serde_names() {
        let json = serde_json::to_string(&RadialVariant::FloodedAgglomerate).unwrap();
        assert_eq!(json, "\"flooded_agglomerate\"");
    }
}
