//! Continuous Belousov-Zhabotinsky kernel: three competing species, each
//! blurred toward its neighbour mean and then reacted, in a single pass.

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::{GridField, PingPong};
use crate::initial::bz_fields;
use crate::kinetics::CyclicCompetition;
use crate::perturbation::Perturbation;
use crate::simulation::Model;
use crate::snapshot::Snapshot;
use crate::stencil::neighbor_average_blend_into;
use crate::utils::clamp_unit;
use log::debug;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BzSettings {
    /// Blend factor toward the 8-neighbour mean, in `[0, 1]`.
    pub diffusion: f32,
    pub reaction: CyclicCompetition,
}

impl Default for BzSettings {
    fn default() -> Self {
        Self {
            diffusion: 0.2,
            reaction: CyclicCompetition::default(),
        }
    }
}

pub struct BzKernel {
    a: PingPong<f32>,
    b: PingPong<f32>,
    c: PingPong<f32>,
    settings: BzSettings,
}

impl BzKernel {
    /// # Panics
    ///
    /// Panics if the three channels differ in shape.
    pub fn from_fields(
        a: GridField<f32>,
        b: GridField<f32>,
        c: GridField<f32>,
        settings: BzSettings,
    ) -> Self {
        assert!(
            a.same_shape(&b) && a.same_shape(&c),
            "BZ channels must share a shape"
        );
        debug!("bz kernel: {}x{}, {settings:?}", a.width(), a.height());
        Self {
            a: PingPong::new(a),
            b: PingPong::new(b),
            c: PingPong::new(c),
            settings,
        }
    }

    pub fn new(width: usize, height: usize, settings: BzSettings, rng_seed: u64) -> Self {
        let [a, b, c] = bz_fields(width, height, rng_seed);
        Self::from_fields(a, b, c, settings)
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.width,
            config.height,
            config.bz,
            config.rng_seed,
        ))
    }

    pub fn channels(&self) -> [&GridField<f32>; 3] {
        [self.a.current(), self.b.current(), self.c.current()]
    }
}

impl Model for BzKernel {
    fn name(&self) -> &'static str {
        "bz"
    }

    fn width(&self) -> usize {
        self.a.current().width()
    }

    fn height(&self) -> usize {
        self.a.current().height()
    }

    fn step(&mut self) {
        let BzSettings {
            diffusion,
            reaction,
        } = self.settings;

        for channel in [&mut self.a, &mut self.b, &mut self.c] {
            let (current, next) = channel.split();
            neighbor_average_blend_into(current, diffusion, next);
        }

        // Reaction is cell-local, so it can run in place on the blended buffers.
        self.a
            .next_mut()
            .as_mut_slice()
            .par_iter_mut()
            .zip(self.b.next_mut().as_mut_slice().par_iter_mut())
            .zip(self.c.next_mut().as_mut_slice().par_iter_mut())
            .for_each(|((a, b), c)| {
                (*a, *b, *c) = reaction.react(*a, *b, *c);
            });

        self.a.swap();
        self.b.swap();
        self.c.swap();
    }

    /// Removes `delta_u` from channel a and adds `delta_v` to channel b.
    fn inject(&mut self, perturbation: &Perturbation) {
        perturbation.apply(self.a.current_mut(), self.b.current_mut());
    }

    fn snapshot(&self) -> Snapshot {
        let to_byte = |x: f32| (clamp_unit(x) * 255.0) as u8;
        let rgb = self
            .a
            .current()
            .as_slice()
            .iter()
            .zip(self.b.current().as_slice())
            .zip(self.c.current().as_slice())
            .map(|((&a, &b), &c)| [to_byte(a), to_byte(b), to_byte(c)])
            .collect();
        Snapshot::rgb(self.width(), self.height(), rgb)
    }
}
