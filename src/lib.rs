pub mod boundary;
pub mod bz_automaton;
pub mod bz_kernel;
pub mod config;
pub mod error;
pub mod gradient;
pub mod gradient_presets;
pub mod gray_scott_model;
pub mod grid;
pub mod initial;
pub mod integrator;
pub mod kinetics;
pub mod model_presets;
pub mod perturbation;
pub mod simulation;
pub mod snapshot;
pub mod stencil;
mod utils;

// Re-export commonly used items
pub use config::{ModelKind, SimulationConfig};
pub use error::{ColormapError, ConfigError};
pub use gray_scott_model::ReactionDiffusionSystem;
pub use grid::{GridField, PingPong};
pub use model_presets::ModelPreset;
pub use simulation::{Model, Simulation};
pub use snapshot::{Channels, Snapshot};
