use crate::utils::{Interpolate, Rgb, clamp_f32, map_t_of_range_a_to_range_b};
use itertools::Itertools;

type TColor = (f32, Rgb);

#[derive(Debug, Clone)]
struct Spectrum(Vec<TColor>);

impl Spectrum {
    pub fn from_colors(color_a: Rgb, color_b: Rgb) -> Self {
        Self(vec![(0.0, color_a), (1.0, color_b)])
    }

    pub fn add_color_at_t(&mut self, t: f32, color: Rgb) {
        let t = clamp_f32(t, 0.0, 1.0);
        self.0.push((t, color));
        // Stable sort: a stop added later at the same t sorts after earlier ones.
        self.0.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    pub fn color_at_t(&self, t: f32) -> Rgb {
        let t = clamp_f32(t, 0.0, 1.0);
        let (before_color, after_color) = self.get_bounding_colors_for_t(t);
        if after_color.0 <= before_color.0 {
            return after_color.1;
        }
        let mapped_t = map_t_of_range_a_to_range_b(t, before_color.0..after_color.0, 0.0..1.0);

        before_color.1.interpolate(&after_color.1, mapped_t)
    }

    fn get_bounding_colors_for_t(&self, t: f32) -> (TColor, TColor) {
        match self.0.iter().find_position(|(color_t, _)| *color_t >= t) {
            Some((0, first)) => (*first, *first),
            Some((position, upper_color)) => (self.0[position - 1], *upper_color),
            None => {
                let last = self.0[self.0.len() - 1];
                (last, last)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct GradientLut([Rgb; 256]);

impl GradientLut {
    pub fn color_at_t(&self, t: u8) -> Rgb {
        self.0[t as usize]
    }
}

impl From<&Spectrum> for GradientLut {
    fn from(spectrum: &Spectrum) -> Self {
        let mut arr = [[0u8, 0u8, 0u8]; 256];

        for (i, color) in arr.iter_mut().enumerate() {
            *color = spectrum.color_at_t(i as f32 / 255.0);
        }

        GradientLut(arr)
    }
}

/// Piecewise-linear colormap baked into a 256-entry lookup table.
#[derive(Debug, Clone)]
pub struct ColorGradient {
    spectrum: Spectrum,
    lut: GradientLut,
}

impl ColorGradient {
    pub fn from_colors(color_a: Rgb, color_b: Rgb) -> Self {
        let spectrum = Spectrum::from_colors(color_a, color_b);

        Self {
            lut: (&spectrum).into(),
            spectrum,
        }
    }

    pub fn add_color_at_t(&mut self, t: f32, color: Rgb) {
        self.spectrum.add_color_at_t(t, color);
        self.rebuild_lut();
    }

    /// `t` outside `[0, 1]` is clamped.
    pub fn color_at_t(&self, t: f32) -> Rgb {
        self.lut.color_at_t((clamp_f32(t, 0.0, 1.0) * 255.0) as u8)
    }

    pub fn color_at_t_u8(&self, t: u8) -> Rgb {
        self.lut.color_at_t(t)
    }

    fn rebuild_lut(&mut self) {
        self.lut = (&self.spectrum).into();
    }
}
