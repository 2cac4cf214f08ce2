mod cli;

use anyhow::Context as _;
use circular_queue::CircularQueue;
use clap::Parser;
use cli::Cli;
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use reaction_diffusion_patterns::gradient::ColorGradient;
use reaction_diffusion_patterns::gradient_presets::colormap_by_name;
use reaction_diffusion_patterns::{Channels, ModelKind, Simulation};
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

const INJECT_RADIUS: usize = 8;
const INJECT_DELTA_U: f32 = 0.2;
const INJECT_DELTA_V: f32 = 0.3;

const HEADLESS_FRAMES: u64 = 1000;
const FPS_WINDOW: usize = 60;

/// Rolling frame timer, reported every `FPS_WINDOW` frames.
struct FrameTimer {
    durations: CircularQueue<Duration>,
    last: Instant,
    frames: u64,
}

impl FrameTimer {
    fn new() -> Self {
        Self {
            durations: CircularQueue::with_capacity(FPS_WINDOW),
            last: Instant::now(),
            frames: 0,
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        self.durations.push(now - self.last);
        self.last = now;
        self.frames += 1;

        if self.frames % FPS_WINDOW as u64 == 0 {
            let total: Duration = self.durations.iter().sum();
            let fps = self.durations.len() as f64 / total.as_secs_f64().max(f64::EPSILON);
            info!("frame {}: {fps:.1} FPS", self.frames);
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.to_config();
    if config.model == ModelKind::GrayScott {
        info!(
            "{} preset base, F = {}, K = {}",
            cli.preset.name(),
            config.gray_scott.feed,
            config.gray_scott.kill
        );
    }
    let mut simulation = Simulation::from_config(&config).context("invalid configuration")?;

    if cli.headless {
        run_headless(&mut simulation, cli.frames.unwrap_or(HEADLESS_FRAMES));
        return Ok(());
    }

    let colormap = colormap_by_name(&config.display.colormap)?;
    run_windowed(simulation, colormap, config.display.scale, config.display.fps, cli.frames)
}

fn run_headless(simulation: &mut Simulation, frames: u64) {
    let progress_every = (frames / 10).max(1);
    let mut timer = FrameTimer::new();

    for frame in 1..=frames {
        simulation.advance_frame();
        timer.tick();
        if frame % progress_every == 0 {
            info!("{frame}/{frames} frames, {} steps", simulation.steps_taken());
        }
    }
    simulation.request_stop();

    let snapshot = simulation.snapshot();
    let mean = match snapshot.channels() {
        Channels::Intensity(values) | Channels::Gray(values) => {
            values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
        }
        Channels::Rgb(values) => {
            values
                .iter()
                .flat_map(|rgb| rgb.iter().map(|&v| f64::from(v)))
                .sum::<f64>()
                / (values.len() * 3) as f64
        }
    };
    info!(
        "finished {} steps, mean snapshot level {mean:.2}",
        simulation.steps_taken()
    );
}

fn run_windowed(
    mut simulation: Simulation,
    colormap: ColorGradient,
    scale: u32,
    fps: u32,
    max_frames: Option<u64>,
) -> anyhow::Result<()> {
    let model_width = simulation.model().width() as u32;
    let model_height = simulation.model().height() as u32;

    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(
            f64::from(model_width * scale),
            f64::from(model_height * scale),
        );
        WindowBuilder::new()
            .with_title(format!("Reaction Diffusion: {}", simulation.model().name()))
            .with_inner_size(size)
            .with_min_inner_size(LogicalSize::new(
                f64::from(model_width),
                f64::from(model_height),
            ))
            .build(&event_loop)?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(model_width, model_height, surface_texture)?
    };

    let frame_period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut next_frame = Instant::now();
    let mut timer = FrameTimer::new();

    event_loop.run(|event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            simulation
                .snapshot()
                .write_rgba(pixels.frame_mut(), Some(&colormap));
            if let Err(err) = pixels.render() {
                error!("pixels.render() failed: {err}");
                simulation.request_stop();
                elwt.exit();
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(KeyCode::Escape) || input.close_requested() {
                simulation.request_stop();
                elwt.exit();
                return;
            }

            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    error!("pixels.resize_surface() failed: {err}");
                    simulation.request_stop();
                    elwt.exit();
                    return;
                }
            }

            if input.mouse_held(MouseButton::Left) {
                if let Some(cursor) = input.cursor() {
                    // Off-surface positions come back unclamped; injection clips.
                    let (x, y) = match pixels.window_pos_to_pixel(cursor) {
                        Ok((x, y)) => (x as isize, y as isize),
                        Err(outside) => outside,
                    };
                    simulation.inject(x, y, INJECT_RADIUS, INJECT_DELTA_U, INJECT_DELTA_V);
                }
            }

            let now = Instant::now();
            if now >= next_frame {
                simulation.advance_frame();
                timer.tick();
                window.request_redraw();
                next_frame += frame_period;
                if next_frame < now {
                    debug!("falling behind the {fps} FPS target");
                    next_frame = now + frame_period;
                }
            }

            if max_frames.is_some_and(|limit| timer.frames >= limit) {
                simulation.request_stop();
            }
            if !simulation.is_running() {
                elwt.exit();
                return;
            }

            elwt.set_control_flow(ControlFlow::WaitUntil(next_frame));
        }
    })?;

    info!("exited after {} steps", simulation.steps_taken());
    Ok(())
}
