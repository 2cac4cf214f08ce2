//! The simulation context handed to an external driver.
//!
//! The core owns no loop. A driver calls [`Simulation::advance_frame`] (or
//! [`Simulation::step`]) once per iteration, forwards pointer input to
//! [`Simulation::inject`], draws [`Simulation::snapshot`], and checks
//! [`Simulation::is_running`] to decide when to quit.

use crate::bz_automaton::BzAutomaton;
use crate::bz_kernel::BzKernel;
use crate::config::{ModelKind, SimulationConfig};
use crate::error::ConfigError;
use crate::gray_scott_model::ReactionDiffusionSystem;
use crate::perturbation::Perturbation;
use crate::snapshot::Snapshot;
use log::{debug, info};

/// One simulation variant: its state, its step rule and its color contract.
pub trait Model: Send {
    fn name(&self) -> &'static str;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Advances by exactly one timestep. Never blocks, never fails.
    fn step(&mut self);

    fn inject(&mut self, perturbation: &Perturbation);

    fn snapshot(&self) -> Snapshot;
}

pub struct Simulation {
    model: Box<dyn Model>,
    steps_per_frame: usize,
    steps_taken: u64,
    running: bool,
}

impl Simulation {
    pub fn new(model: Box<dyn Model>, steps_per_frame: usize) -> Self {
        Self {
            model,
            steps_per_frame: steps_per_frame.max(1),
            steps_taken: 0,
            running: true,
        }
    }

    /// Validates `config` and builds the model it selects.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let model: Box<dyn Model> = match config.model {
            ModelKind::GrayScott => Box::new(ReactionDiffusionSystem::from_config(config)?),
            ModelKind::Bz => Box::new(BzKernel::from_config(config)?),
            ModelKind::Automaton => Box::new(BzAutomaton::from_config(config)?),
        };
        info!(
            "{} simulation on a {}x{} grid, {} step(s) per frame",
            model.name(),
            model.width(),
            model.height(),
            config.display.steps_per_frame
        );
        Ok(Self::new(model, config.display.steps_per_frame))
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn step(&mut self) {
        self.model.step();
        self.steps_taken += 1;
    }

    /// Runs `steps_per_frame` steps. Does nothing once a stop was requested.
    /// Returns the number of steps taken.
    pub fn advance_frame(&mut self) -> usize {
        if !self.running {
            return 0;
        }
        for _ in 0..self.steps_per_frame {
            self.step();
        }
        self.steps_per_frame
    }

    /// Disturbs a filled disk around `(center_x, center_y)` in grid space.
    pub fn inject(
        &mut self,
        center_x: isize,
        center_y: isize,
        radius: usize,
        delta_u: f32,
        delta_v: f32,
    ) {
        let perturbation = Perturbation::new(center_x, center_y, radius, delta_u, delta_v);
        debug!("inject {perturbation:?}");
        self.model.inject(&perturbation);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.model.snapshot()
    }

    pub fn request_stop(&mut self) {
        if self.running {
            info!("stop requested after {} steps", self.steps_taken);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Channels;

    struct Counter {
        steps: usize,
        injections: usize,
    }

    impl Model for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn width(&self) -> usize {
            2
        }

        fn height(&self) -> usize {
            1
        }

        fn step(&mut self) {
            self.steps += 1;
        }

        fn inject(&mut self, _perturbation: &Perturbation) {
            self.injections += 1;
        }

        fn snapshot(&self) -> Snapshot {
            Snapshot::gray(2, 1, vec![self.steps as u8, self.injections as u8])
        }
    }

    fn counter_simulation(steps_per_frame: usize) -> Simulation {
        Simulation::new(
            Box::new(Counter {
                steps: 0,
                injections: 0,
            }),
            steps_per_frame,
        )
    }

    #[test]
    fn frame_runs_configured_sub_steps() {
        let mut simulation = counter_simulation(4);
        assert_eq!(simulation.advance_frame(), 4);
        assert_eq!(simulation.advance_frame(), 4);
        assert_eq!(simulation.steps_taken(), 8);
        assert_eq!(simulation.snapshot().channels(), &Channels::Gray(vec![8, 0]));
    }

    #[test]
    fn stop_halts_frames() {
        let mut simulation = counter_simulation(2);
        simulation.advance_frame();
        simulation.request_stop();
        assert!(!simulation.is_running());
        assert_eq!(simulation.advance_frame(), 0);
        assert_eq!(simulation.steps_taken(), 2);
    }

    #[test]
    fn inject_forwards_to_model() {
        let mut simulation = counter_simulation(1);
        simulation.inject(3, 4, 8, 0.2, 0.3);
        simulation.step();
        assert_eq!(simulation.snapshot().channels(), &Channels::Gray(vec![1, 1]));
    }

    #[test]
    fn builds_each_model_from_config() {
        for (kind, name) in [
            (ModelKind::GrayScott, "gray-scott"),
            (ModelKind::Bz, "bz"),
            (ModelKind::Automaton, "automaton"),
        ] {
            let config = SimulationConfig {
                model: kind,
                width: 16,
                height: 12,
                ..SimulationConfig::default()
            };
            let mut simulation = Simulation::from_config(&config).unwrap();
            assert_eq!(simulation.model().name(), name);
            assert_eq!(simulation.model().width(), 16);
            assert_eq!(simulation.model().height(), 12);
            simulation.advance_frame();
            assert_eq!(simulation.snapshot().width(), 16);
        }
    }

    #[test]
    fn invalid_config_fails_before_stepping() {
        let config = SimulationConfig {
            height: 0,
            ..SimulationConfig::default()
        };
        assert!(Simulation::from_config(&config).is_err());
    }
}
