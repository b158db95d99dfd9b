// Top-level screens of a game session.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Splash,
    Menu,
    Playing,
    Success,
    Crashed,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Splash => "SPLASH",
            GameState::Menu => "MENU",
            GameState::Playing => "PLAYING",
            GameState::Success => "SUCCESS",
            GameState::Crashed => "CRASHED",
        };
        f.write_str(name)
    }
}
