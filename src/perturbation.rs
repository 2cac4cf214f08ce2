//! Localized disturbances requested by whoever drives the simulation.

use crate::grid::GridField;
use crate::utils::clamp_unit;

/// A filled disk of forced change, centred on a grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub center_x: isize,
    pub center_y: isize,
    pub radius: usize,
    /// Amount removed from the first channel.
    pub delta_u: f32,
    /// Amount added to the second channel.
    pub delta_v: f32,
}

impl Perturbation {
    pub fn new(center_x: isize, center_y: isize, radius: usize, delta_u: f32, delta_v: f32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            delta_u,
            delta_v,
        }
    }

    /// In-bounds cells with `(x - cx)² + (y - cy)² <= radius²`. The boundary
    /// is inclusive and nothing wraps. Any `radius` and center are accepted.
    pub fn cells(&self, width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
        // i128 holds every isize ± usize; u128 holds radius² for any usize.
        let r = self.radius as i128;
        let r_squared = (self.radius as u128).pow(2);
        let (cx, cy) = (self.center_x as i128, self.center_y as i128);
        let span = move |c: i128, len: usize| (c - r).max(0)..=(c + r).min(len as i128 - 1);
        let (x_range, y_range) = (span(cx, width), span(cy, height));

        y_range
            .flat_map(move |y| x_range.clone().map(move |x| (x, y)))
            .filter(move |&(x, y)| {
                let (dx, dy) = ((x - cx).unsigned_abs(), (y - cy).unsigned_abs());
                dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r_squared
            })
            .map(|(x, y)| (x as usize, y as usize))
    }

    /// Lowers `u` by `delta_u` and raises `v` by `delta_v` across the disk,
    /// clamping both to `[0, 1]`.
    pub fn apply(&self, u: &mut GridField<f32>, v: &mut GridField<f32>) {
        debug_assert!(u.same_shape(v));
        for (x, y) in self.cells(u.width(), u.height()) {
            u.set(x, y, clamp_unit(u.get(x, y) - self.delta_u));
            v.set(x, y, clamp_unit(v.get(x, y) + self.delta_v));
        }
    }

    /// Forces every cell of the disk to `state`.
    pub fn paint<T: Copy>(&self, field: &mut GridField<T>, state: T) {
        for (x, y) in self.cells(field.width(), field.height()) {
            field.set(x, y, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touches_exactly_the_disk() {
        let mut u = GridField::filled(64, 64, 0.5);
        let mut v = GridField::filled(64, 64, 0.5);
        Perturbation::new(32, 32, 8, 0.2, 0.3).apply(&mut u, &mut v);

        let mut touched = 0;
        for y in 0..64 {
            for x in 0..64 {
                let inside = (x as i64 - 32).pow(2) + (y as i64 - 32).pow(2) <= 64;
                if inside {
                    touched += 1;
                    assert!((u.get(x, y) - 0.3).abs() < 1e-6);
                    assert!((v.get(x, y) - 0.8).abs() < 1e-6);
                } else {
                    assert_eq!(u.get(x, y), 0.5);
                    assert_eq!(v.get(x, y), 0.5);
                }
            }
        }
        // Lattice points within radius 8.
        assert_eq!(touched, 197);
    }

    #[test]
    fn clamps_after_applying_deltas() {
        let mut u = GridField::filled(5, 5, 0.1);
        let mut v = GridField::filled(5, 5, 0.9);
        Perturbation::new(2, 2, 0, 0.2, 0.3).apply(&mut u, &mut v);
        assert_eq!(u.get(2, 2), 0.0);
        assert_eq!(v.get(2, 2), 1.0);
        assert_eq!(u.get(2, 1), 0.1);
    }

    #[test]
    fn clips_at_the_grid_edge_without_wrapping() {
        let cells: Vec<_> = Perturbation::new(0, 0, 1, 0.0, 0.0).cells(8, 8).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn center_outside_the_grid_still_reaches_in() {
        let cells: Vec<_> = Perturbation::new(-2, 3, 2, 0.0, 0.0).cells(8, 8).collect();
        assert_eq!(cells, vec![(0, 3)]);
        assert_eq!(Perturbation::new(-5, -5, 2, 0.0, 0.0).cells(8, 8).count(), 0);
    }

    #[test]
    fn huge_radius_covers_the_whole_grid() {
        assert_eq!(Perturbation::new(2, 2, 1 << 32, 0.0, 0.0).cells(5, 5).count(), 25);
        assert_eq!(Perturbation::new(2, 2, usize::MAX, 0.0, 0.0).cells(5, 5).count(), 25);
        assert_eq!(
            Perturbation::new(isize::MIN, isize::MAX, usize::MAX, 0.0, 0.0)
                .cells(5, 5)
                .count(),
            25
        );
    }

    #[test]
    fn far_center_with_small_radius_touches_nothing() {
        assert_eq!(Perturbation::new(isize::MAX, isize::MIN, 8, 0.0, 0.0).cells(5, 5).count(), 0);
    }

    #[test]
    fn paint_sets_discrete_state() {
        let mut field = GridField::filled(5, 5, 0u8);
        Perturbation::new(2, 2, 1, 0.0, 0.0).paint(&mut field, 9);
        assert_eq!(field.as_slice().iter().filter(|&&s| s == 9).count(), 5);
    }
}
