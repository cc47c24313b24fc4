mod assembly;
mod config;
mod error;
mod generator;
mod grid;
mod input;
mod materializer;
mod render;
mod win;
mod world;

use crate::assembly::assemble;
use crate::config::Settings;
use crate::error::MazeError;
use crate::input::{command_for, nudge_ball, Command};
use crate::render::{render, Renderer};
use crate::win::WinController;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<(), MazeError> {
    let settings = Settings::from_env(terminal::size()?)?;
    init_logging(&settings)?;
    log::info!(
        "maze {}x{} in a {}x{} viewport at {} fps, seed {:?}",
        settings.rows,
        settings.columns,
        settings.viewport_width,
        settings.viewport_height,
        settings.fps,
        settings.seed
    );

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(settings: &Settings) -> Result<(), MazeError> {
    let mut builder = env_logger::Builder::from_default_env();
    if settings.log_file.is_some() {
        builder
            .filter_level(log::LevelFilter::Info)
            .parse_default_env();
    }
    builder.target(log_target(settings.log_file.as_deref())?);
    builder.init();
    Ok(())
}

/// stderr shares the screen with the game, so records are discarded unless a
/// log file is configured.
fn log_target(log_file: Option<&Path>) -> io::Result<env_logger::Target> {
    let pipe: Box<dyn Write + Send> = match log_file {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::sink()),
    };
    Ok(env_logger::Target::Pipe(pipe))
}

fn run(stdout: &mut Stdout, settings: &Settings) -> Result<(), MazeError> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let layout = settings.layout()?;
    let mut scene = {
        let grid = generator::generate(&mut rng, settings.rows, settings.columns)?;
        assemble(&grid, &layout)
    };
    log::debug!(
        "ball at {:?}, goal at {:?}",
        scene.world.position(scene.ball),
        scene.world.position(scene.goal)
    );

    scene.world.set_timestep(1.0 / settings.fps as f32);
    let mut controller = WinController::default();
    let mut renderer = Renderer::new(
        settings.viewport_width as usize,
        settings.viewport_height as usize,
    );
    let frame_time = Duration::from_micros(1_000_000 / settings.fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match command_for(&key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Nudge(dir)) => nudge_ball(&mut scene.world, scene.ball, dir),
                    None => {}
                }
            }
        }

        let pairs = scene.world.step();
        if !pairs.is_empty() {
            let mutations = controller.on_collision_start(&pairs, &scene.world.bodies());
            scene.world.apply(&mutations);
        }

        render(stdout, &scene.world, controller.state(), settings, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
