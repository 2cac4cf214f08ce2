//! Simulation configuration and its validation.

use crate::bz_automaton::AutomatonRule;
use crate::bz_kernel::BzSettings;
use crate::error::ConfigError;
use crate::gradient_presets::colormap_by_name;
use crate::initial::SeedShape;
use crate::integrator::IntegrationSettings;
use crate::kinetics::GrayScottKinetics;

/// Smallest grid edge. Operators handle axes too short for an edge patch.
pub const MIN_GRID_DIMENSION: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// Gray-Scott reaction-diffusion.
    #[default]
    GrayScott,
    /// Continuous Belousov-Zhabotinsky kernel.
    Bz,
    /// Belousov-Zhabotinsky cellular automaton.
    Automaton,
}

/// How the driver presents frames. None of this affects the numerics.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Window pixels per grid cell.
    pub scale: u32,
    pub fps: u32,
    /// Model steps between two snapshots.
    pub steps_per_frame: usize,
    pub colormap: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scale: 1,
            fps: 30,
            steps_per_frame: 1,
            colormap: "gray".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub model: ModelKind,
    pub width: usize,
    pub height: usize,
    pub gray_scott: GrayScottKinetics,
    pub integration: IntegrationSettings,
    pub seed_shape: SeedShape,
    pub bz: BzSettings,
    pub automaton: AutomatonRule,
    pub display: DisplaySettings,
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::GrayScott,
            width: 512,
            height: 512,
            gray_scott: GrayScottKinetics::default(),
            integration: IntegrationSettings::default(),
            seed_shape: SeedShape::default(),
            bz: BzSettings::default(),
            automaton: AutomatonRule::default(),
            display: DisplaySettings::default(),
            rng_seed: 0,
        }
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeRate { name, value })
    }
}

fn at_least_one(name: &'static str, value: u64) -> Result<(), ConfigError> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn at_most_255(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value <= 255 {
        Ok(())
    } else {
        Err(ConfigError::StateOutOfRange { name, value })
    }
}

impl SimulationConfig {
    /// Checks every option, whichever model is selected, so a bad value is
    /// reported before anything is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_DIMENSION || self.height < MIN_GRID_DIMENSION {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID_DIMENSION,
            });
        }

        let dt = self.integration.dt;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(dt));
        }

        let GrayScottKinetics { du, dv, feed, kill } = self.gray_scott;
        non_negative("Du", du)?;
        non_negative("Dv", dv)?;
        non_negative("feed rate F", feed)?;
        non_negative("kill rate K", kill)?;

        let BzSettings {
            diffusion,
            reaction,
        } = self.bz;
        if !(0.0..=1.0).contains(&diffusion) {
            return Err(ConfigError::DiffusionOutOfRange(diffusion));
        }
        non_negative("pa", reaction.pa)?;
        non_negative("pb", reaction.pb)?;
        non_negative("pc", reaction.pc)?;

        let AutomatonRule { q, g, k1, k2 } = self.automaton;
        at_least_one("q", u64::from(q))?;
        at_most_255("q", q)?;
        at_most_255("g", g)?;
        at_least_one("k1", u64::from(k1))?;
        at_least_one("k2", u64::from(k2))?;

        at_least_one("scale", u64::from(self.display.scale))?;
        at_least_one("fps", u64::from(self.display.fps))?;
        at_least_one("steps per frame", self.display.steps_per_frame as u64)?;
        colormap_by_name(&self.display.colormap)?;

        Ok(())
    }
}
