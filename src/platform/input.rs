//! Keyboard state from terminal key events
//!
//! Terminals only report key presses unless the keyboard enhancement
//! protocol is active. With release events a key is held until released;
//! without them every press or auto-repeat holds it for `HOLD_TICKS`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Ticks a press keeps a key down when releases are not reported
pub const HOLD_TICKS: u32 = 8;

/// Requests that are handled by the frontend rather than the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Hold {
    #[default]
    Up,
    Down,
    Ticks(u32),
}

impl Hold {
    fn is_down(&self) -> bool {
        !matches!(self, Hold::Up)
    }

    fn decay(&mut self) {
        if let Hold::Ticks(n) = *self {
            *self = if n > 1 { Hold::Ticks(n - 1) } else { Hold::Up };
        }
    }
}

/// Turns key events into a per-tick `TickInput`
#[derive(Debug, Default)]
pub struct KeyTracker {
    release_events: bool,
    left: Hold,
    right: Hold,
    launch: bool,
    pause: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Default::default()
        }
    }

    /// Feed one key event
    pub fn handle(&mut self, key: KeyEvent) -> Option<Command> {
        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        let released = key.kind == KeyEventKind::Release;

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if pressed {
                    return Some(Command::Quit);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                if key.kind == KeyEventKind::Press {
                    return Some(Command::Quit);
                }
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                if pressed {
                    self.press_direction(true);
                } else if released {
                    self.left = Hold::Up;
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                if pressed {
                    self.press_direction(false);
                } else if released {
                    self.right = Hold::Up;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if key.kind == KeyEventKind::Press {
                    self.launch = true;
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if key.kind == KeyEventKind::Press {
                    self.pause = true;
                }
            }
            _ => {}
        }
        None
    }

    fn press_direction(&mut self, left: bool) {
        let hold = if self.release_events {
            Hold::Down
        } else {
            Hold::Ticks(HOLD_TICKS)
        };
        let (this, other) = if left {
            (&mut self.left, &mut self.right)
        } else {
            (&mut self.right, &mut self.left)
        };
        *this = hold;
        // Without releases the opposite key would linger for its whole window
        if !self.release_events {
            *other = Hold::Up;
        }
    }

    /// Key state for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left.is_down(),
            right: self.right.is_down(),
            launch: self.launch,
            pause: self.pause,
        }
    }

    /// Clear one-shot inputs and age press-only holds after a tick ran
    pub fn end_tick(&mut self) {
        self.launch = false;
        self.pause = false;
        self.left.decay();
        self.right.decay();
    }
}
