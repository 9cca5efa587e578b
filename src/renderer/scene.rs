//! Scene building: snapshot in, draw list out
//!
//! A `DrawList` is everything a frontend needs to paint one frame: filled
//! rectangles and text runs in screen coordinates, colored by role.

use serde::{Deserialize, Serialize};

use crate::consts::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::settings::ColorRole;
use crate::sim::{GamePhase, Rect, Snapshot};

/// A single draw command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Filled axis-aligned rectangle
    Rect { rect: Rect, color: ColorRole },
    /// Single line of text; `x`/`y` is the top-left of the line
    Text {
        text: String,
        x: i32,
        y: i32,
        color: ColorRole,
    },
}

/// Ordered draw commands for one frame (painter's order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub width: i32,
    pub height: i32,
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    fn rect(&mut self, rect: Rect, color: ColorRole) {
        self.commands.push(DrawCmd::Rect { rect, color });
    }

    /// Text whose baseline sits at `baseline`
    fn text(&mut self, text: impl Into<String>, x: i32, baseline: i32, color: ColorRole) {
        self.commands.push(DrawCmd::Text {
            text: text.into(),
            x,
            y: baseline - GLYPH_HEIGHT,
            color,
        });
    }

    /// Horizontally centered text
    fn centered(&mut self, text: &str, baseline: i32, color: ColorRole) {
        let x = self.width / 2 - text_width(text) / 2;
        self.text(text, x, baseline, color);
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, ColorRole)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Rect { rect, color } => Some((rect, *color)),
            DrawCmd::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            DrawCmd::Rect { .. } => None,
        })
    }
}

/// Rendered width of a line in the fixed-width font
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_WIDTH
}

/// Build the draw list for a snapshot
pub fn build_scene(snapshot: &Snapshot) -> DrawList {
    let (w, h) = (snapshot.screen_width, snapshot.screen_height);
    let mut list = DrawList::new(w, h);

    match snapshot.phase {
        GamePhase::Start => {
            list.centered("Welcome to BrickBreaker", h / 2 + 10, ColorRole::Text);
            list.centered("Press Space to Start Playing...", h / 2 + 30, ColorRole::Text);
            list.centered("Left/Right to move, P to pause, Esc to quit", h - 10, ColorRole::Accent);
        }

        GamePhase::Playing | GamePhase::Paused => {
            draw_playfield(&mut list, snapshot);
            if snapshot.phase == GamePhase::Paused {
                list.centered("Paused", h / 2 + 60, ColorRole::Accent);
                list.centered("Press P to Resume", h / 2 + 80, ColorRole::Text);
            }
        }

        GamePhase::GameOver => {
            list.centered("Game Over", h / 2 + 10, ColorRole::Text);
            list.centered(
                &format!("Your Score is {}", snapshot.score),
                h / 2 + 30,
                ColorRole::Text,
            );
            list.centered("Press Space to Play Again...", h / 2 + 50, ColorRole::Text);
            if snapshot.score > 0 && snapshot.score == snapshot.high_score {
                list.centered("New High Score!", h / 2 + 70, ColorRole::Accent);
            }
        }
    }

    list
}

fn draw_playfield(list: &mut DrawList, snapshot: &Snapshot) {
    list.rect(snapshot.paddle, ColorRole::Paddle);
    list.rect(snapshot.ball, ColorRole::Ball);

    for block in snapshot.blocks.iter().filter(|b| b.alive) {
        list.rect(block.rect, ColorRole::Block(block.hits_remaining));
    }

    let h = snapshot.screen_height;
    list.text(format!("Score: {}", snapshot.score), 10, h / 2 + 10, ColorRole::Text);
    list.text(
        format!("High Score: {}", snapshot.high_score),
        10,
        h / 2 + 30,
        ColorRole::Text,
    );
}
