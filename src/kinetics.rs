//! Local reaction terms. Each strategy is a pure function of one cell's
//! channel values, its diffusion terms and the model parameters.

use crate::utils::clamp_unit;

/// Time derivative of a two-species cell, given its values and Laplacians.
///
/// Implementors are what an [`crate::integrator::Integrator`] drives; it never
/// inspects which model it is advancing.
pub trait Kinetics: Sync {
    fn rates(&self, u: f32, v: f32, lap_u: f32, lap_v: f32) -> (f32, f32);
}

/// Gray-Scott feed/kill kinetics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayScottKinetics {
    /// Diffusion rate of U.
    pub du: f32,
    /// Diffusion rate of V.
    pub dv: f32,
    pub feed: f32,
    pub kill: f32,
}

impl Default for GrayScottKinetics {
    fn default() -> Self {
        Self {
            du: 0.16,
            dv: 0.08,
            feed: 0.035,
            kill: 0.060,
        }
    }
}

impl Kinetics for GrayScottKinetics {
    #[inline]
    fn rates(&self, u: f32, v: f32, lap_u: f32, lap_v: f32) -> (f32, f32) {
        let uvv = u * v * v;
        let du = self.du * lap_u - uvv + self.feed * (1.0 - u);
        let dv = self.dv * lap_v + uvv - (self.feed + self.kill) * v;
        (du, dv)
    }
}

/// Diffusion with the reaction terms zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PureDiffusion {
    pub du: f32,
    pub dv: f32,
}

impl Kinetics for PureDiffusion {
    #[inline]
    fn rates(&self, _u: f32, _v: f32, lap_u: f32, lap_v: f32) -> (f32, f32) {
        (self.du * lap_u, self.dv * lap_v)
    }
}

/// Cyclic competition between three species of the continuous BZ model:
/// `a` beats `b`, `b` beats `c`, `c` beats `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclicCompetition {
    pub pa: f32,
    pub pb: f32,
    pub pc: f32,
}

impl Default for CyclicCompetition {
    fn default() -> Self {
        Self {
            pa: 1.0,
            pb: 1.0,
            pc: 1.0,
        }
    }
}

impl CyclicCompetition {
    /// One reaction update, each channel clamped to `[0, 1]` on the spot.
    #[inline]
    pub fn react(&self, a: f32, b: f32, c: f32) -> (f32, f32, f32) {
        let next_a = a + a * (self.pa * b - self.pc * c);
        let next_b = b + b * (self.pb * c - self.pa * a);
        let next_c = c + c * (self.pc * a - self.pb * b);
        (clamp_unit(next_a), clamp_unit(next_b), clamp_unit(next_c))
    }
}
