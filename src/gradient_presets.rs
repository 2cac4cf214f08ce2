use crate::error::ColormapError;
use crate::gradient::ColorGradient;
use std::collections::HashMap;

pub fn new_gray() -> ColorGradient {
    ColorGradient::from_colors([0, 0, 0], [255, 255, 255])
}

pub fn new_pink_and_blue() -> ColorGradient {
    let mut gradient = ColorGradient::from_colors([0, 0, 0], [255, 255, 255]);
    gradient.add_color_at_t(0.80, [0, 20, 230]);
    gradient.add_color_at_t(0.63, [200, 0, 255]);
    gradient.add_color_at_t(0.60, [255, 0, 0]);
    gradient.add_color_at_t(0.53, [0, 255, 255]);
    gradient.add_color_at_t(0.40, [0, 0, 0]);

    gradient
}

pub fn new_rainbow() -> ColorGradient {
    let mut gradient = ColorGradient::from_colors([110, 0, 160], [255, 0, 0]);
    gradient.add_color_at_t(0.20, [0, 0, 255]);
    gradient.add_color_at_t(0.40, [0, 200, 255]);
    gradient.add_color_at_t(0.55, [0, 255, 0]);
    gradient.add_color_at_t(0.75, [255, 255, 0]);
    gradient.add_color_at_t(0.88, [255, 128, 0]);

    gradient
}

pub fn new_inferno() -> ColorGradient {
    let mut gradient = ColorGradient::from_colors([0, 0, 4], [252, 255, 164]);
    gradient.add_color_at_t(0.25, [87, 16, 110]);
    gradient.add_color_at_t(0.50, [188, 55, 84]);
    gradient.add_color_at_t(0.75, [249, 142, 9]);

    gradient
}

pub fn new_ocean() -> ColorGradient {
    let mut gradient = ColorGradient::from_colors([0, 10, 30], [230, 255, 255]);
    gradient.add_color_at_t(0.35, [0, 60, 120]);
    gradient.add_color_at_t(0.70, [40, 170, 200]);

    gradient
}

lazy_static::lazy_static! {
    static ref COLORMAPS: HashMap<&'static str, fn() -> ColorGradient> = {
        let mut map: HashMap<&'static str, fn() -> ColorGradient> = HashMap::new();
        map.insert("gray", new_gray);
        map.insert("pink-and-blue", new_pink_and_blue);
        map.insert("rainbow", new_rainbow);
        map.insert("inferno", new_inferno);
        map.insert("ocean", new_ocean);
        map
    };
}

/// Names accepted by [`colormap_by_name`], sorted.
pub fn available_colormaps() -> Vec<&'static str> {
    let mut names: Vec<_> = COLORMAPS.keys().copied().collect();
    names.sort_unstable();
    names
}

pub fn colormap_by_name(name: &str) -> Result<ColorGradient, ColormapError> {
    COLORMAPS
        .get(name)
        .map(|build| build())
        .ok_or_else(|| ColormapError::Unknown {
            name: name.to_string(),
            available: available_colormaps().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_colormap_builds() {
        for name in available_colormaps() {
            assert!(colormap_by_name(name).is_ok(), "{name} failed to build");
        }
    }

    #[test]
    fn unknown_colormap_lists_alternatives() {
        let err = colormap_by_name("viridian").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("viridian"));
        assert!(message.contains("gray"));
        assert!(message.contains("rainbow"));
    }

    #[test]
    fn gray_is_identity() {
        let gray = new_gray();
        for level in [0u8, 17, 128, 255] {
            assert_eq!(gray.color_at_t_u8(level), [level, level, level]);
        }
    }
}
