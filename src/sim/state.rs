//! Game state and core simulation types
//!
//! `GameState` owns every entity exclusively. Renderers only ever see a
//! [`Snapshot`].

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::score::Scoreboard;
use crate::settings::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for launch input
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ball went past the floor; waiting for restart input
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game over",
        }
    }
}

/// Screen edge the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Top,
    Right,
}

/// Things that happened during a tick (for logging and frontends)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    WallBounce(Wall),
    /// Normalized impact offset in [-1, 1] (0 in flip mode)
    PaddleBounce { offset: f64 },
    BlockHit { index: usize, hits_remaining: u32 },
    BlockDestroyed { index: usize },
    BallLost,
    Restarted,
    Paused,
    Resumed,
}

/// The player's paddle. Moves horizontally only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    /// Left edge at mid-screen, pulled back if the paddle would overhang
    pub fn new(config: &GameConfig) -> Self {
        let max_x = (config.screen_width - config.paddle_width).max(0);
        Self {
            rect: Rect::new(
                (config.screen_width / 2).min(max_x),
                config.screen_height - config.paddle_y_offset,
                config.paddle_width,
                config.paddle_height,
            ),
        }
    }

    /// Shift horizontally, clamped to `[0, screen_width - w]`
    pub fn move_by(&mut self, dx: i32, screen_width: i32) {
        let max_x = (screen_width - self.rect.w).max(0);
        self.rect.x = self.rect.x.saturating_add(dx).clamp(0, max_x);
    }
}

/// The ball: a square with an integer velocity in units per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: IVec2,
}

impl Ball {
    /// Centered on screen, heading down and to the right
    /// Left edge at mid-screen, pulled back if the paddle would overhang
    pub fn new(config: &GameConfig) -> Self {
        let max_x = (config.screen_width - config.paddle_width).max(0);
        Self {
            rect: Rect::new(
                (config.screen_width / 2).min(max_x),
                config.screen_height / 2,
                config.ball_size,
                config.ball_size,
            ),
            vel: IVec2::new(config.ball_speed, config.ball_speed),
        }
    }

    pub fn advance(&mut self) {
        self.rect.x += self.vel.x;
        self.rect.y += self.vel.y;
    }

    pub fn speed(&self) -> f64 {
        (self.vel.as_dvec2()).length()
    }
}

/// A destructible block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub hits_remaining: u32,
    /// Cleared once `hits_remaining` reaches zero; dead blocks are skipped
    pub alive: bool,
}

impl Block {
    pub fn new(rect: Rect, capacity: u32) -> Self {
        Self {
            rect,
            hits_remaining: capacity,
            alive: capacity > 0,
        }
    }

    /// Register one hit. Returns true if this hit removed the block.
    pub fn take_hit(&mut self, shrink: i32, min_height: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        self.rect.h = (self.rect.h - shrink).max(min_height);
        if self.hits_remaining == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Fixed-size row of blocks, left to right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRow {
    pub blocks: Vec<Block>,
}

impl BlockRow {
    /// Lay out `block_count` blocks, each preceded by `block_gap` pixels
    pub fn new(config: &GameConfig) -> Self {
        let mut blocks = Vec::with_capacity(config.block_count);
        let mut x = 0;
        for _ in 0..config.block_count {
            x += config.block_gap;
            blocks.push(Block::new(
                Rect::new(x, config.block_top, config.block_width, config.block_height),
                config.block_hit_capacity,
            ));
            x += config.block_width;
        }
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}

/// A block as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub rect: Rect,
    pub hits_remaining: u32,
    pub alive: bool,
}

/// Immutable per-frame view of the game for the render boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub paddle: Rect,
    pub ball: Rect,
    pub blocks: Vec<BlockView>,
    pub score: u32,
    pub high_score: u32,
    pub screen_width: i32,
    pub screen_height: i32,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockRow,
    pub scoreboard: Scoreboard,
    /// Simulation tick counter (ticks spent in Playing)
    pub time_ticks: u64,
    /// Events recorded by the most recent tick (traced by the binary)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game on the title screen
    pub fn new(config: GameConfig) -> Self {
        let paddle = Paddle::new(&config);
        let ball = Ball::new(&config);
        let blocks = BlockRow::new(&config);
        Self {
            config,
            phase: GamePhase::Start,
            paddle,
            ball,
            blocks,
            scoreboard: Scoreboard::new(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Re-seed paddle, ball and blocks to their initial layout
    pub fn reset_entities(&mut self) {
        self.paddle = Paddle::new(&self.config);
        self.ball = Ball::new(&self.config);
        self.blocks = BlockRow::new(&self.config);
    }

    /// Begin a new game: fresh entities, score zeroed, high score kept
    pub fn restart(&mut self) {
        self.reset_entities();
        self.scoreboard.reset_for_new_game();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!(
            "Game restarted (high score {})",
            self.scoreboard.high_score
        );
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            paddle: self.paddle.rect,
            ball: self.ball.rect,
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockView {
                    rect: b.rect,
                    hits_remaining: b.hits_remaining,
                    alive: b.alive,
                })
                .collect(),
            score: self.scoreboard.score,
            high_score: self.scoreboard.high_score,
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height,
        }
    }
}
