//! Rectangular cell storage and the ping-pong pair the models step through.

use crate::utils::{clamp_unit, get_wrapping_index};
use rayon::prelude::*;

/// A `width × height` lattice of cells stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> GridField<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// # Panics
    ///
    /// Panics if `cells.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cell buffer does not match a {width}x{height} grid"
        );
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn same_shape<U>(&self, other: &GridField<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let index = self.index(x, y);
        self.cells[index] = value;
    }

    /// Toroidal lookup: coordinates outside the grid wrap to the opposite edge.
    #[inline]
    pub fn get_wrapping(&self, x: isize, y: isize) -> T {
        self.cells[get_wrapping_index(x, y, self.width, self.height)]
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl GridField<f32> {
    /// Sum over all cells, accumulated in `f64`.
    pub fn sum(&self) -> f64 {
        self.cells.iter().map(|&c| f64::from(c)).sum()
    }

    /// Clamps every cell into `[0, 1]`.
    pub fn clamp_unit(&mut self) {
        self.cells.par_iter_mut().for_each(|c| *c = clamp_unit(*c));
    }
}

/// Current/next buffer pair. Steps read the frozen current buffer, write the
/// next one, then [`PingPong::swap`] hands ownership over without copying.
#[derive(Debug, Clone)]
pub struct PingPong<T> {
    current: GridField<T>,
    next: GridField<T>,
}

impl<T: Copy> PingPong<T> {
    pub fn new(initial: GridField<T>) -> Self {
        Self {
            next: initial.clone(),
            current: initial,
        }
    }

    pub fn current(&self) -> &GridField<T> {
        &self.current
    }

    /// Direct access to the current buffer, for mutators that run between steps.
    pub fn current_mut(&mut self) -> &mut GridField<T> {
        &mut self.current
    }

    /// Frozen read view and writable next buffer for one step.
    pub fn split(&mut self) -> (&GridField<T>, &mut GridField<T>) {
        (&self.current, &mut self.next)
    }

    pub fn next_mut(&mut self) -> &mut GridField<T> {
        &mut self.next
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}
