//! Discrete spatial operators over a [`GridField`].
//!
//! Every lookup wraps toroidally. Edge correction, if any, is the job of
//! [`crate::boundary`] once the whole step has been combined.

use crate::grid::GridField;
use crate::utils::{wrap_dec, wrap_inc};
use rayon::prelude::*;

/// Interior weighting used for the Laplacian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Stencil {
    /// Center −20, orthogonal 4, diagonal 1, all over 6.
    #[default]
    NinePoint,
    /// Orthogonal neighbours minus four times the center.
    FivePoint,
}

impl Stencil {
    #[inline]
    pub fn laplacian_at(self, field: &GridField<f32>, x: usize, y: usize) -> f32 {
        let (w, h) = (field.width(), field.height());
        let (xm, xp) = (wrap_dec(x, w), wrap_inc(x, w));
        let (ym, yp) = (wrap_dec(y, h), wrap_inc(y, h));

        let center = field.get(x, y);
        let orthogonal = field.get(xm, y) + field.get(xp, y) + field.get(x, ym) + field.get(x, yp);

        match self {
            Stencil::NinePoint => {
                let diagonal = field.get(xm, ym)
                    + field.get(xp, ym)
                    + field.get(xm, yp)
                    + field.get(xp, yp);
                (-20.0 * center + 4.0 * orthogonal + diagonal) / 6.0
            }
            Stencil::FivePoint => orthogonal - 4.0 * center,
        }
    }

    /// Writes the Laplacian of `field` into `out`, one row per task.
    pub fn laplacian_into(self, field: &GridField<f32>, out: &mut GridField<f32>) {
        debug_assert!(field.same_shape(out));
        let width = field.width();
        out.as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.laplacian_at(field, x, y);
                }
            });
    }

    pub fn laplacian(self, field: &GridField<f32>) -> GridField<f32> {
        let mut out = GridField::filled(field.width(), field.height(), 0.0);
        self.laplacian_into(field, &mut out);
        out
    }
}

/// Mean of the eight cells surrounding `(x, y)`.
#[inline]
pub fn neighbor_average(field: &GridField<f32>, x: usize, y: usize) -> f32 {
    let (w, h) = (field.width(), field.height());
    let (xm, xp) = (wrap_dec(x, w), wrap_inc(x, w));
    let (ym, yp) = (wrap_dec(y, h), wrap_inc(y, h));

    let sum = field.get(xm, ym)
        + field.get(x, ym)
        + field.get(xp, ym)
        + field.get(xm, y)
        + field.get(xp, y)
        + field.get(xm, yp)
        + field.get(x, yp)
        + field.get(xp, yp);
    sum / 8.0
}

/// `center * (1 - rate) + mean(neighbours) * rate` for every cell of `src`.
///
/// This folds the diffusion coefficient into the operator, so the result is a
/// new concentration rather than a second derivative.
pub fn neighbor_average_blend_into(src: &GridField<f32>, rate: f32, out: &mut GridField<f32>) {
    debug_assert!(src.same_shape(out));
    let width = src.width();
    out.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = src.get(x, y) * (1.0 - rate) + neighbor_average(src, x, y) * rate;
            }
        });
}
