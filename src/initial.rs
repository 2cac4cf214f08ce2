//! Initial conditions for every model.

use crate::grid::GridField;
use crate::perturbation::Perturbation;
use noise::{NoiseFn, Perlin};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Starting pattern for the Gray-Scott fields. Everything not seeded starts
/// at the trivial steady state U = 1, V = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedShape {
    /// U = 0, V = 1 on `[c - r, c + r)` along both axes.
    CenteredSquare { half_extent: usize },
    /// U = 0, V = 1 on the filled disk around the center.
    CenteredDisk { radius: usize },
    /// U in `[0.9, 1)`, V in `[0, 0.1)`, uniformly random per cell.
    Noise,
    /// V follows smooth Perlin noise, U = 1 - V.
    Perlin { frequency: f64 },
}

impl Default for SeedShape {
    fn default() -> Self {
        SeedShape::CenteredSquare { half_extent: 30 }
    }
}

pub fn gray_scott_fields(
    width: usize,
    height: usize,
    shape: SeedShape,
    rng_seed: u64,
) -> (GridField<f32>, GridField<f32>) {
    let (cx, cy) = (width / 2, height / 2);
    match shape {
        SeedShape::CenteredSquare { half_extent } => {
            let xs = cx.saturating_sub(half_extent)..(cx + half_extent).min(width);
            let ys = cy.saturating_sub(half_extent)..(cy + half_extent).min(height);
            let inside = |x: usize, y: usize| xs.contains(&x) && ys.contains(&y);
            (
                GridField::from_fn(width, height, |x, y| if inside(x, y) { 0.0 } else { 1.0 }),
                GridField::from_fn(width, height, |x, y| if inside(x, y) { 1.0 } else { 0.0 }),
            )
        }
        SeedShape::CenteredDisk { radius } => {
            let mut u = GridField::filled(width, height, 1.0);
            let mut v = GridField::filled(width, height, 0.0);
            let disk = Perturbation::new(cx as isize, cy as isize, radius, 0.0, 0.0);
            disk.paint(&mut u, 0.0);
            disk.paint(&mut v, 1.0);
            (u, v)
        }
        SeedShape::Noise => {
            let mut rng = SmallRng::seed_from_u64(rng_seed);
            let u = GridField::from_fn(width, height, |_, _| rng.gen_range(0.9..1.0));
            let v = GridField::from_fn(width, height, |_, _| rng.gen_range(0.0..0.1));
            (u, v)
        }
        SeedShape::Perlin { frequency } => {
            let perlin = Perlin::new(rng_seed as u32);
            let v = GridField::from_fn(width, height, |x, y| {
                let n = perlin.get([x as f64 * frequency, y as f64 * frequency]);
                ((n as f32 + 1.0) * 0.5).clamp(0.0, 1.0)
            });
            let u = GridField::from_vec(width, height, v.as_slice().iter().map(|v| 1.0 - v).collect());
            (u, v)
        }
    }
}

/// a in `[0.9, 1)`, b and c in `[0, 0.1)`.
pub fn bz_fields(width: usize, height: usize, rng_seed: u64) -> [GridField<f32>; 3] {
    let mut rng = SmallRng::seed_from_u64(rng_seed);
    let a = GridField::from_fn(width, height, |_, _| rng.gen_range(0.0..1.0f32) * 0.1 + 0.9);
    let b = GridField::from_fn(width, height, |_, _| rng.gen_range(0.0..1.0f32) * 0.1);
    let c = GridField::from_fn(width, height, |_, _| rng.gen_range(0.0..1.0f32) * 0.1);
    [a, b, c]
}

/// Uniformly random states in `[0, q]`.
pub fn automaton_states(width: usize, height: usize, q: u32, rng_seed: u64) -> GridField<u8> {
    let mut rng = SmallRng::seed_from_u64(rng_seed);
    let top = q.min(255) as u8;
    GridField::from_fn(width, height, |_, _| rng.gen_range(0..=top))
}
