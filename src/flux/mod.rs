//! Species flux kernels.
//!
//! Provides the two interface kernels used by porous-electrode models:
//! - Planar advection-diffusion flux between gas-phase control volumes
//! - Radial shell diffusion inside spherical agglomerates
//!
//! Both are pure functions of their arguments. Batch helpers evaluate every
//! interface of a column or agglomerate with identical arithmetic.

mod error;
mod planar;
mod radial;

pub use error::FluxError;
pub use planar::{
    PlanarFluxParameters, planar_advection_diffusion_flux, planar_column_fluxes,
    planar_flux_from_properties,
};
#[cfg(feature = "parallel")]
pub use planar::planar_column_fluxes_parallel;
pub use radial::{
    RadialFluxParameters, RadialVariant, radial_profile_rates, radial_shell_diffusion_rate,
};
