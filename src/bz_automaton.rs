//! Hodgepodge-style excitable-media automaton.
//!
//! Cells cycle through ready (0), active (`1..q`) and firing (`q`). Everything
//! here is integer arithmetic on `u8` states; nothing is shared with the
//! continuous models beyond the grid and its ping-pong pair.

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::{GridField, PingPong};
use crate::initial::automaton_states;
use crate::perturbation::Perturbation;
use crate::simulation::Model;
use crate::snapshot::Snapshot;
use log::debug;
use rayon::prelude::*;

/// Hex-like neighbourhood skewed onto the square lattice, as `(dx, dy)`.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [(-1, -1), (0, -1), (-1, 0), (1, 0), (0, 1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonRule {
    /// Firing state, at most 255.
    pub q: u32,
    /// Growth added to active cells each step.
    pub g: u32,
    /// Divisor for firing neighbours of a ready cell.
    pub k1: u32,
    /// Divisor for active neighbours of a ready cell.
    pub k2: u32,
}

impl Default for AutomatonRule {
    fn default() -> Self {
        Self {
            q: 200,
            g: 35,
            k1: 2,
            k2: 3,
        }
    }
}

impl AutomatonRule {
    /// States at or above `q` count as firing.
    #[inline]
    pub fn is_firing(&self, state: u8) -> bool {
        u32::from(state) >= self.q
    }

    #[inline]
    pub fn is_active(&self, state: u8) -> bool {
        state > 0 && !self.is_firing(state)
    }

    /// Next state of a cell given its own state and its six neighbours.
    pub fn transition(&self, own: u8, neighbors: [u8; 6]) -> u8 {
        let firing = neighbors.iter().filter(|&&s| self.is_firing(s)).count() as u32;
        let active = neighbors.iter().filter(|&&s| self.is_active(s)).count() as u32;

        let next = if own == 0 {
            firing / self.k1 + active / self.k2
        } else if self.is_active(own) {
            let sum: u32 = neighbors.iter().map(|&s| u32::from(s)).sum();
            sum / (firing + active + 1) + self.g
        } else {
            0
        };

        next.min(255) as u8
    }
}

pub struct BzAutomaton {
    cells: PingPong<u8>,
    rule: AutomatonRule,
}

impl BzAutomaton {
    pub fn from_states(states: GridField<u8>, rule: AutomatonRule) -> Self {
        debug!(
            "bz automaton: {}x{}, {rule:?}",
            states.width(),
            states.height()
        );
        Self {
            cells: PingPong::new(states),
            rule,
        }
    }

    pub fn new(width: usize, height: usize, rule: AutomatonRule, rng_seed: u64) -> Self {
        Self::from_states(automaton_states(width, height, rule.q, rng_seed), rule)
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.width,
            config.height,
            config.automaton,
            config.rng_seed,
        ))
    }

    pub fn states(&self) -> &GridField<u8> {
        self.cells.current()
    }
}

fn neighbors_of(field: &GridField<u8>, x: usize, y: usize) -> [u8; 6] {
    let (x, y) = (x as isize, y as isize);
    NEIGHBOR_OFFSETS.map(|(dx, dy)| field.get_wrapping(x + dx, y + dy))
}

impl Model for BzAutomaton {
    fn name(&self) -> &'static str {
        "automaton"
    }

    fn width(&self) -> usize {
        self.cells.current().width()
    }

    fn height(&self) -> usize {
        self.cells.current().height()
    }

    fn step(&mut self) {
        let rule = self.rule;
        let (current, next) = self.cells.split();
        let width = current.width();

        next.as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = rule.transition(current.get(x, y), neighbors_of(current, x, y));
                }
            });

        self.cells.swap();
    }

    /// Forces the disk into the firing state; the deltas are ignored.
    fn inject(&mut self, perturbation: &Perturbation) {
        let firing = self.rule.q.min(255) as u8;
        perturbation.paint(self.cells.current_mut(), firing);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::gray(
            self.width(),
            self.height(),
            self.cells.current().as_slice().to_vec(),
        )
    }
}
