//! # pemfc-transport
//!
//! Species mass-transport kernels for porous electrochemical cells.
//!
//! This crate provides the interface fluxes a fuel-cell electrode model
//! evaluates every time step:
//! - Planar advection-diffusion flux between gas-phase control volumes
//!   (Darcy advection + Fickian diffusion)
//! - Radial shell diffusion inside spherical catalyst agglomerates
//!   (core-shell and flooded-agglomerate variants)
//! - Gas property providers (ideal-gas mixture with mixture-averaged diffusion)
//! - JSON configuration of mixtures and kernel coefficients
//!
//! Time integration, reaction kinetics, and mesh setup belong to the caller.

pub mod config;
pub mod flux;
pub mod properties;
pub mod types;

// Re-export main types for convenience
pub use config::{ConfigError, TransportConfig};
pub use flux::{
    FluxError, PlanarFluxParameters, RadialFluxParameters, RadialVariant,
    planar_advection_diffusion_flux, planar_column_fluxes, planar_flux_from_properties,
    radial_profile_rates, radial_shell_diffusion_rate,
};
#[cfg(feature = "parallel")]
pub use flux::planar_column_fluxes_parallel;
pub use properties::{
    GAS_CONSTANT, GasProperties, IdealGasMixture, MixtureConfig, SpeciesData, StateError,
    TransportProperties,
};
pub use types::{NodeIndex, SpeciesVector, ThermoState};
