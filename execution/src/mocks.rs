//! Test fixtures for driving the engine with predetermined draws.

use crate::casino::OutcomeSource;
use retrocade_types::casino::{DICE_ROLL_STEPS, GRID_CELLS};
use std::collections::VecDeque;

/// Outcome source that replays a fixed script of uniform draws.
///
/// Panics when the script runs dry, so a test that consumes more draws
/// than it planned fails loudly instead of settling on garbage.
pub struct ScriptedRng {
    draws: VecDeque<f64>,
}

impl ScriptedRng {
    /// Draw that flips heads.
    pub const HEADS: f64 = 0.25;
    /// Draw that flips tails.
    pub const TAILS: f64 = 0.75;

    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// A draw landing in the middle of `cell`'s bucket, so float error
    /// cannot shift it into a neighboring cell.
    pub fn cell(cell: u8) -> f64 {
        (cell as f64 + 0.5) / GRID_CELLS as f64
    }

    /// A draw producing exactly `hundredths` on the dice roll.
    pub fn roll(hundredths: u16) -> f64 {
        (hundredths as f64 + 0.5) / DICE_ROLL_STEPS as f64
    }
}

impl OutcomeSource for ScriptedRng {
    fn draw_uniform(&mut self) -> f64 {
        self.draws.pop_front().expect("scripted draws exhausted")
    }
}
