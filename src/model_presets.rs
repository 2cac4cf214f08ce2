/// Named Gray-Scott (feed, kill) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelPreset {
    Mitosis,
    Coral,
    Maze,
    Solitons,
    Worms,
    Fingerprint,
    Spots,
    Chaos,
    MovingSpots,
    Turing,
    Fluctuation,
}

impl ModelPreset {
    /// `(F, K)`.
    pub fn feed_kill(self) -> (f32, f32) {
        match self {
            ModelPreset::Mitosis => (0.028, 0.062),
            ModelPreset::Coral => (0.037, 0.060),
            ModelPreset::Maze => (0.029, 0.057),
            ModelPreset::Solitons => (0.030, 0.062),
            ModelPreset::Worms => (0.078, 0.061),
            ModelPreset::Fingerprint => (0.037, 0.060),
            ModelPreset::Spots => (0.035, 0.065),
            ModelPreset::Chaos => (0.026, 0.051),
            ModelPreset::MovingSpots => (0.014, 0.054),
            ModelPreset::Turing => (0.035, 0.060),
            ModelPreset::Fluctuation => (0.062, 0.060),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelPreset::Mitosis => "Mitosis",
            ModelPreset::Coral => "Coral",
            ModelPreset::Maze => "Maze",
            ModelPreset::Solitons => "Solitons",
            ModelPreset::Worms => "Worms",
            ModelPreset::Fingerprint => "Fingerprint",
            ModelPreset::Spots => "Spots",
            ModelPreset::Chaos => "Chaos",
            ModelPreset::MovingSpots => "Moving Spots",
            ModelPreset::Turing => "Turing",
            ModelPreset::Fluctuation => "Fluctuation",
        }
    }
}
