use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::GridField;
use crate::initial::{SeedShape, gray_scott_fields};
use crate::integrator::{IntegrationSettings, Integrator, Species};
use crate::kinetics::GrayScottKinetics;
use crate::perturbation::Perturbation;
use crate::simulation::Model;
use crate::snapshot::Snapshot;
use log::debug;

/// Gray-Scott reaction-diffusion over double-buffered U and V fields.
pub struct ReactionDiffusionSystem {
    species: Species,
    integrator: Integrator<GrayScottKinetics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChemicalSpecies {
    U,
    V,
}

impl ReactionDiffusionSystem {
    pub fn new(
        width: usize,
        height: usize,
        kinetics: GrayScottKinetics,
        settings: IntegrationSettings,
        seed: SeedShape,
        rng_seed: u64,
    ) -> Self {
        let (u, v) = gray_scott_fields(width, height, seed, rng_seed);
        Self::from_fields(u, v, kinetics, settings)
    }

    /// Starts from explicit U and V fields.
    ///
    /// # Panics
    ///
    /// Panics if the two fields differ in shape.
    pub fn from_fields(
        u: GridField<f32>,
        v: GridField<f32>,
        kinetics: GrayScottKinetics,
        settings: IntegrationSettings,
    ) -> Self {
        let (width, height) = (u.width(), u.height());
        debug!("gray-scott: {width}x{height}, {kinetics:?}");
        Self {
            species: Species::new(u, v),
            integrator: Integrator::new(kinetics, settings, width, height),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.width,
            config.height,
            config.gray_scott,
            config.integration,
            config.seed_shape,
            config.rng_seed,
        ))
    }

    pub fn get(&self, cs: ChemicalSpecies, x: usize, y: usize) -> f32 {
        self.field(cs).get(x, y)
    }

    pub fn field(&self, cs: ChemicalSpecies) -> &GridField<f32> {
        match cs {
            ChemicalSpecies::U => self.species.u(),
            ChemicalSpecies::V => self.species.v(),
        }
    }

    pub fn update(&mut self) {
        self.integrator.step(&mut self.species);
    }
}

impl Model for ReactionDiffusionSystem {
    fn name(&self) -> &'static str {
        "gray-scott"
    }

    fn width(&self) -> usize {
        self.species.width()
    }

    fn height(&self) -> usize {
        self.species.height()
    }

    fn step(&mut self) {
        self.update();
    }

    fn inject(&mut self, perturbation: &Perturbation) {
        let (u, v) = self.species.current_mut();
        perturbation.apply(u, v);
    }

    /// `(U - V)` scaled to `[0, 255]`.
    fn snapshot(&self) -> Snapshot {
        let values = self
            .species
            .u()
            .as_slice()
            .iter()
            .zip(self.species.v().as_slice())
            .map(|(u, v)| ((u - v) * 255.0).clamp(0.0, 255.0) as u8)
            .collect();
        Snapshot::intensity(self.width(), self.height(), values)
    }
}
