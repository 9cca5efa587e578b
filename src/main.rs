//! Brick Pong entry point
//!
//! Sets up logging and the terminal, then runs the fixed-timestep game loop.

use std::error::Error;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use brick_pong::consts::*;
use brick_pong::platform::{Command, KeyTracker, Tui};
use brick_pong::renderer::build_scene;
use brick_pong::sim::{GameState, tick};
use brick_pong::{GameConfig, Palette};

/// Game instance holding all state
struct Game {
    state: GameState,
    palette: Palette,
    keys: KeyTracker,
    accumulator: f32,
    last_time: Instant,
}

impl Game {
    fn new(config: GameConfig, release_events: bool) -> Self {
        Self {
            state: GameState::new(config),
            palette: Palette::default(),
            keys: KeyTracker::new(release_events),
            accumulator: 0.0,
            last_time: Instant::now(),
        }
    }

    /// Drain pending key events without blocking
    fn poll_input(&mut self) -> std::io::Result<Option<Command>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(cmd) = self.keys.handle(key) {
                    return Ok(Some(cmd));
                }
            }
        }
        Ok(None)
    }

    /// Run simulation ticks
    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_time).as_secs_f32().min(MAX_FRAME_DT);
        self.last_time = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.keys.snapshot();
            tick(&mut self.state, &input);
            for event in &self.state.events {
                log::trace!("tick {}: {:?}", self.state.time_ticks, event);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.keys.end_tick();
        }
    }

    /// Render the current frame
    fn render(&self, tui: &mut Tui) -> std::io::Result<()> {
        let list = build_scene(&self.state.snapshot());
        tui.draw(&list, &self.palette)
    }

    fn run(&mut self, tui: &mut Tui) -> std::io::Result<()> {
        let frame_budget = Duration::from_secs_f32(SIM_DT);
        loop {
            if let Some(Command::Quit) = self.poll_input()? {
                log::info!(
                    "Quit during {} (score {}, high score {})",
                    self.state.phase.as_str(),
                    self.state.score(),
                    self.state.high_score()
                );
                return Ok(());
            }

            self.update();
            self.render(tui)?;

            // Idle until the next frame, waking early for input
            let elapsed = self.last_time.elapsed();
            if elapsed < frame_budget {
                event::poll(frame_budget - elapsed)?;
            }
        }
    }
}

/// Logs go to a file: the terminal belongs to the game
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let path = std::env::temp_dir().join("brick-pong.log");
    match std::fs::File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    log::info!("Brick Pong starting...");

    let config = GameConfig::load()?;
    log::info!(
        "Screen {}x{}, ball speed {}, paddle bounce {}",
        config.screen_width,
        config.screen_height,
        config.ball_speed,
        config.paddle_bounce.as_str()
    );

    let mut tui = Tui::init()?;
    let mut game = Game::new(config, tui.release_events);
    let result = game.run(&mut tui);
    tui.restore()?;
    result?;
    Ok(())
}
