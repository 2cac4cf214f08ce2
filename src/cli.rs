use clap::{Parser, ValueEnum};
use reaction_diffusion_patterns::boundary::BoundaryPolicy;
use reaction_diffusion_patterns::config::{DisplaySettings, ModelKind, SimulationConfig};
use reaction_diffusion_patterns::initial::SeedShape;
use reaction_diffusion_patterns::integrator::Scheme;
use reaction_diffusion_patterns::model_presets::ModelPreset;
use reaction_diffusion_patterns::stencil::Stencil;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedKind {
    Square,
    Disk,
    Noise,
    Perlin,
}

/// Reaction-diffusion and excitable-media patterns.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = ModelKind::GrayScott)]
    pub model: ModelKind,

    #[arg(short = 'W', long, default_value_t = 512)]
    pub width: usize,

    #[arg(short = 'H', long, default_value_t = 512)]
    pub height: usize,

    /// Diffusion rate of U.
    #[arg(long, default_value_t = 0.16)]
    pub du: f32,

    /// Diffusion rate of V.
    #[arg(long, default_value_t = 0.08)]
    pub dv: f32,

    /// Feed rate; overrides --preset.
    #[arg(short = 'F', long)]
    pub feed: Option<f32>,

    /// Kill rate; overrides --preset.
    #[arg(short = 'K', long)]
    pub kill: Option<f32>,

    #[arg(long, value_enum, default_value_t = ModelPreset::Turing)]
    pub preset: ModelPreset,

    #[arg(long, default_value_t = 1.0)]
    pub dt: f32,

    #[arg(long, value_enum, default_value_t = Scheme::Heun)]
    pub scheme: Scheme,

    #[arg(long, value_enum, default_value_t = Stencil::NinePoint)]
    pub stencil: Stencil,

    #[arg(long, value_enum, default_value_t = BoundaryPolicy::Neumann)]
    pub boundary: BoundaryPolicy,

    #[arg(long, value_enum, default_value_t = SeedKind::Square)]
    pub seed_shape: SeedKind,

    /// Half-extent of the square seed or radius of the disk seed.
    #[arg(long, default_value_t = 30)]
    pub seed_radius: usize,

    /// Spatial frequency of the Perlin seed.
    #[arg(long, default_value_t = 0.05)]
    pub perlin_frequency: f64,

    /// Window pixels per grid cell.
    #[arg(long, default_value_t = 1)]
    pub scale: u32,

    #[arg(short = 'f', long, default_value_t = 30)]
    pub fps: u32,

    /// Simulation steps per displayed frame.
    #[arg(long, default_value_t = 1)]
    pub steps: usize,

    /// BZ blend rate toward the neighbour mean.
    #[arg(short = 'D', long, default_value_t = 0.2)]
    pub diffusion: f32,

    #[arg(short = 'a', default_value_t = 1.0)]
    pub pa: f32,

    #[arg(short = 'b', default_value_t = 1.0)]
    pub pb: f32,

    #[arg(short = 'c', default_value_t = 1.0)]
    pub pc: f32,

    /// Automaton firing state.
    #[arg(long, default_value_t = 200)]
    pub q: u32,

    /// Automaton growth constant.
    #[arg(long, default_value_t = 35)]
    pub g: u32,

    #[arg(long, default_value_t = 2)]
    pub k1: u32,

    #[arg(long, default_value_t = 3)]
    pub k2: u32,

    #[arg(long, default_value = "gray")]
    pub colormap: String,

    /// Seed for the random initial conditions.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Run without a window.
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,
}

impl Cli {
    pub fn to_config(&self) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        let (preset_feed, preset_kill) = self.preset.feed_kill();

        let mut config = SimulationConfig {
            model: self.model,
            width: self.width,
            height: self.height,
            seed_shape: match self.seed_shape {
                SeedKind::Square => SeedShape::CenteredSquare {
                    half_extent: self.seed_radius,
                },
                SeedKind::Disk => SeedShape::CenteredDisk {
                    radius: self.seed_radius,
                },
                SeedKind::Noise => SeedShape::Noise,
                SeedKind::Perlin => SeedShape::Perlin {
                    frequency: self.perlin_frequency,
                },
            },
            display: DisplaySettings {
                scale: self.scale,
                fps: self.fps,
                steps_per_frame: self.steps,
                colormap: self.colormap.clone(),
            },
            rng_seed: self.seed,
            ..defaults
        };

        config.gray_scott.du = self.du;
        config.gray_scott.dv = self.dv;
        config.gray_scott.feed = self.feed.unwrap_or(preset_feed);
        config.gray_scott.kill = self.kill.unwrap_or(preset_kill);

        config.integration.dt = self.dt;
        config.integration.scheme = self.scheme;
        config.integration.stencil = self.stencil;
        config.integration.boundary = self.boundary;

        config.bz.diffusion = self.diffusion;
        config.bz.reaction.pa = self.pa;
        config.bz.reaction.pb = self.pb;
        config.bz.reaction.pc = self.pc;

        config.automaton.q = self.q;
        config.automaton.g = self.g;
        config.automaton.k1 = self.k1;
        config.automaton.k2 = self.k2;

        config
    }
}
