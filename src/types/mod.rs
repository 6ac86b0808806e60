//! Strongly-typed domain types for the flux kernels.
//!
//! # Example
//!
//! ```
//! use pemfc_transport::types::{NodeIndex, SpeciesVector, ThermoState};
//!
//! // Humidified air at 350 K
//! let state = ThermoState::new(350.0, 1.0, [0.23, 0.72, 0.05]);
//! assert_eq!(state.n_species(), 3);
//!
//! let rho_k: SpeciesVector = state.partial_densities();
//! assert!((rho_k.sum() - 1.0).abs() < 1e-12);
//!
//! let node = NodeIndex::new(2);
//! assert_eq!(node.get(), 2);
//! ```

mod indices;
mod species;
mod state;

pub use indices::NodeIndex;
pub use species::SpeciesVector;
pub use state::ThermoState;
