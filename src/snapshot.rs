//! Read-only frames handed to whatever draws the simulation.

use crate::gradient::ColorGradient;

/// What each cell of a snapshot means for color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channels {
    /// Gray-Scott `(U - V)` in `[0, 255]`. Replicated across RGB, or looked up
    /// in a colormap when one is supplied.
    Intensity(Vec<u8>),
    /// Channel order is color order.
    Rgb(Vec<[u8; 3]>),
    /// Discrete state used directly as gray level. Colormaps do not apply.
    Gray(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: usize,
    height: usize,
    channels: Channels,
}

impl Snapshot {
    pub fn intensity(width: usize, height: usize, values: Vec<u8>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            channels: Channels::Intensity(values),
        }
    }

    pub fn rgb(width: usize, height: usize, values: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            channels: Channels::Rgb(values),
        }
    }

    pub fn gray(width: usize, height: usize, values: Vec<u8>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            channels: Channels::Gray(values),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    pub fn color_at(&self, index: usize, colormap: Option<&ColorGradient>) -> [u8; 3] {
        match (&self.channels, colormap) {
            (Channels::Intensity(values), Some(gradient)) => gradient.color_at_t_u8(values[index]),
            (Channels::Intensity(values), None) | (Channels::Gray(values), _) => {
                let level = values[index];
                [level, level, level]
            }
            (Channels::Rgb(values), _) => values[index],
        }
    }

    /// Fills an RGBA8 frame of `width * height * 4` bytes. Extra bytes past the
    /// snapshot are left alone.
    pub fn write_rgba(&self, frame: &mut [u8], colormap: Option<&ColorGradient>) {
        for (i, pixel) in frame
            .chunks_exact_mut(4)
            .take(self.width * self.height)
            .enumerate()
        {
            let [r, g, b] = self.color_at(i, colormap);
            pixel.copy_from_slice(&[r, g, b, 0xff]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_replicates_without_colormap() {
        let snapshot = Snapshot::intensity(2, 1, vec![10, 200]);
        let mut frame = [0u8; 8];
        snapshot.write_rgba(&mut frame, None);
        assert_eq!(frame, [10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn intensity_uses_colormap_when_given() {
        let gradient = ColorGradient::from_colors([0, 0, 255], [255, 0, 0]);
        let snapshot = Snapshot::intensity(2, 1, vec![0, 255]);
        let mut frame = [0u8; 8];
        snapshot.write_rgba(&mut frame, Some(&gradient));
        assert_eq!(frame, [0, 0, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn rgb_and_gray_ignore_colormap() {
        let gradient = ColorGradient::from_colors([0, 0, 255], [255, 0, 0]);

        let rgb = Snapshot::rgb(1, 1, vec![[1, 2, 3]]);
        let mut frame = [0u8; 4];
        rgb.write_rgba(&mut frame, Some(&gradient));
        assert_eq!(frame, [1, 2, 3, 255]);

        let gray = Snapshot::gray(1, 1, vec![42]);
        gray.write_rgba(&mut frame, Some(&gradient));
        assert_eq!(frame, [42, 42, 42, 255]);
    }
}
