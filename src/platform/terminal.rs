//! Terminal frontend: setup/teardown and draw list rasterization
//!
//! The logical screen is scaled onto whatever cell grid the terminal offers.
//! Rectangles become runs of full blocks; text is written one glyph per cell.

use std::io::{self, Stdout};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::consts::GLYPH_HEIGHT;
use crate::renderer::{DrawCmd, DrawList};
use crate::settings::{Palette, Rgba};

const FILL: char = '█';

/// One terminal cell after rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
}

/// Convert an RGBA color to a terminal true color
pub fn to_color(rgba: Rgba) -> Color {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(c(rgba[0]), c(rgba[1]), c(rgba[2]))
}

/// Scale a draw list onto a `cols` x `rows` grid
pub fn rasterize(list: &DrawList, palette: &Palette, cols: usize, rows: usize) -> Vec<Vec<Cell>> {
    let blank = Cell {
        ch: ' ',
        fg: palette.text,
    };
    let mut grid = vec![vec![blank; cols]; rows];
    if cols == 0 || rows == 0 || list.width <= 0 || list.height <= 0 {
        return grid;
    }

    let sx = cols as f32 / list.width as f32;
    let sy = rows as f32 / list.height as f32;

    for cmd in &list.commands {
        match cmd {
            DrawCmd::Rect { rect, color } => {
                let fg = palette.resolve(*color);
                let (c0, c1) = span(rect.x, rect.right(), sx, cols);
                let (r0, r1) = span(rect.y, rect.bottom(), sy, rows);
                for row in grid.iter_mut().take(r1).skip(r0) {
                    for cell in row.iter_mut().take(c1).skip(c0) {
                        *cell = Cell { ch: FILL, fg };
                    }
                }
            }
            DrawCmd::Text { text, x, y, color } => {
                let fg = palette.resolve(*color);
                let mid = *y as f32 + GLYPH_HEIGHT as f32 / 2.0;
                let row = (mid * sy).floor();
                if row < 0.0 || row as usize >= rows {
                    continue;
                }
                let col = ((*x as f32 * sx).round()).max(0.0) as usize;
                let line = &mut grid[row as usize];
                for (cell, ch) in line.iter_mut().skip(col).zip(text.chars()) {
                    *cell = Cell { ch, fg };
                }
            }
        }
    }
    grid
}

/// Cell range covered by `[start, end)` in logical pixels; never empty if on screen
fn span(start: i32, end: i32, scale: f32, limit: usize) -> (usize, usize) {
    let a = (start as f32 * scale).floor().max(0.0) as usize;
    let b = (end as f32 * scale).ceil().max(0.0) as usize;
    let a = a.min(limit);
    let b = b.max(a + 1).min(limit);
    (a, b)
}

/// Paint a draw list into a ratatui frame
pub fn draw(frame: &mut Frame, list: &DrawList, palette: &Palette) {
    let bg = to_color(palette.background);
    let border = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(to_color(palette.accent)).bg(bg))
        .title(" Brick Pong ");
    let area = frame.area();
    let inner = border.inner(area);
    frame.render_widget(border, area);

    let grid = rasterize(list, palette, inner.width as usize, inner.height as usize);
    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| {
                    Span::styled(
                        String::from(cell.ch),
                        Style::default().fg(to_color(cell.fg)).bg(bg),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Owns the terminal for the lifetime of the game
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether the terminal reports key releases
    pub release_events: bool,
    restored: bool,
}

/// Run `undo` if `result` failed, then hand the result back
fn or_rollback<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn open_terminal(stdout: Stdout) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

impl Tui {
    /// Take over the terminal. On failure the terminal is left as it was found.
    pub fn init() -> io::Result<Self> {
        enable_raw_mode()?;
        or_rollback(Self::setup(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })
    }

    fn setup() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
        if release_events {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal ready (key release events: {})", release_events);

        let terminal = or_rollback(open_terminal(stdout), || {
            if release_events {
                let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
            }
        })?;
        Ok(Self {
            terminal,
            release_events,
            restored: false,
        })
    }

    pub fn draw(&mut self, list: &DrawList, palette: &Palette) -> io::Result<()> {
        self.terminal.draw(|frame| draw(frame, list, palette))?;
        Ok(())
    }

    /// Give the terminal back to the shell
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if self.release_events {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
