use std::ops::{Add, Div, Mul, Range, Sub};

pub fn get_wrapping_index(x: isize, y: isize, width: usize, height: usize) -> usize {
    let (width, height) = (width as isize, height as isize);
    (y.rem_euclid(height) * width + x.rem_euclid(width)) as usize
}

/// Previous index on a ring of `n` cells.
#[inline]
pub fn wrap_dec(i: usize, n: usize) -> usize {
    if i == 0 { n - 1 } else { i - 1 }
}

/// Next index on a ring of `n` cells.
#[inline]
pub fn wrap_inc(i: usize, n: usize) -> usize {
    if i + 1 >= n { 0 } else { i + 1 }
}

/// Clamps `value` into `[min, max]`. NaN collapses to `min` so the result is
/// always inside the range.
#[inline]
pub fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    clamp_f32(value, 0.0, 1.0)
}

pub fn map_t_of_range_a_to_range_b<T>(t: T, range_a: Range<T>, range_b: Range<T>) -> T
where
    T: Copy + Sub<Output = T> + Div<Output = T> + Add<Output = T> + Mul<Output = T>,
{
    let slope = (range_b.end - range_b.start) / (range_a.end - range_a.start);
    range_b.start + slope * (t - range_a.start)
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

pub type Rgb = [u8; 3];

impl Interpolate for Rgb {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        let [r1, g1, b1] = self;
        let [r2, g2, b2] = other;

        [
            r1.interpolate(r2, t),
            g1.interpolate(g2, t),
            b1.interpolate(b2, t),
        ]
    }
}

impl Interpolate for u8 {
    fn interpolate(&self, other: &Self, t: f32) -> u8 {
        if self == other {
            *self
        } else {
            (f32::from(*self) * (1.0 - t) + f32::from(*other) * t).round() as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_get_index() {
        let test_grid_height = 4;
        let test_grid_width = 3;

        assert_eq!(
            0,
            get_wrapping_index(0, 0, test_grid_width, test_grid_height)
        );
        assert_eq!(
            0,
            get_wrapping_index(3, 0, test_grid_width, test_grid_height)
        );
        assert_eq!(
            0,
            get_wrapping_index(3, 4, test_grid_width, test_grid_height)
        );
        assert_eq!(
            6,
            get_wrapping_index(6, 2, test_grid_width, test_grid_height)
        );
        assert_eq!(
            7,
            get_wrapping_index(-2, -2, test_grid_width, test_grid_height)
        );
        assert_eq!(
            7,
            get_wrapping_index(-2456, 562, test_grid_width, test_grid_height)
        );
    }

    #[test]
    fn test_wrap_neighbours() {
        assert_eq!(wrap_dec(0, 5), 4);
        assert_eq!(wrap_dec(3, 5), 2);
        assert_eq!(wrap_inc(4, 5), 0);
        assert_eq!(wrap_inc(1, 5), 2);
        assert_eq!(wrap_inc(0, 1), 0);
        assert_eq!(wrap_dec(0, 1), 0);
    }

    #[test]
    fn test_clamp_handles_non_finite() {
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(f32::INFINITY), 1.0);
        assert_eq!(clamp_unit(f32::NEG_INFINITY), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_t_of_range_a_to_range_b(0.5, 0.0..1.0, 0.0..10.0), 5.0);
        assert_eq!(map_t_of_range_a_to_range_b(0.75, 0.5..1.0, 0.0..1.0), 0.5);
    }

    #[test]
    fn test_interpolate_rgb() {
        let a: Rgb = [0, 100, 200];
        let b: Rgb = [200, 100, 0];
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
        assert_eq!(a.interpolate(&b, 0.5), [100, 100, 100]);
    }

    proptest! {
        #[test]
        fn clamp_is_idempotent(x in proptest::num::f32::ANY) {
            let once = clamp_unit(x);
            prop_assert_eq!(clamp_unit(once).to_bits(), once.to_bits());
            prop_assert!((0.0..=1.0).contains(&once));
        }
    }
}
