//! Casino game execution module.
//!
//! This module contains the game logic for all three wager variants:
//! - Coin Flip
//! - Dice (over/under)
//! - Mines
//!
//! Each game module holds its pure payout functions; the session facade
//! in [`crate::Session`] sequences validation, the stake debit, the draw,
//! settlement, and history recording around them.

pub mod coinflip;
pub mod dice;
pub mod mines;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use retrocade_types::casino::{CoinSide, InsufficientBalance, DICE_ROLL_STEPS, GRID_CELLS};
use thiserror::Error;

/// Uniform random outcome source, the sole nondeterministic input to the
/// engine.
///
/// Every game outcome is a deterministic function of `draw_uniform`
/// calls; the derived draws below exist so no game module reinterprets
/// the primitive on its own. Cosmetic randomness (animation frames) does
/// not exist here at all.
pub trait OutcomeSource {
    /// Draw a uniformly distributed value in `[0, 1)`, independent of
    /// previous draws.
    fn draw_uniform(&mut self) -> f64;

    /// Flip a coin.
    fn flip_coin(&mut self) -> CoinSide {
        if self.draw_uniform() < 0.5 {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }

    /// Roll in hundredths over [0, 100.00): 7550 = 75.50.
    fn roll_hundredths(&mut self) -> u16 {
        (self.draw_uniform() * DICE_ROLL_STEPS as f64) as u16
    }

    /// Pick a board cell in [0, GRID_CELLS).
    fn pick_cell(&mut self) -> u8 {
        (self.draw_uniform() * GRID_CELLS as f64) as u8
    }
}

/// ChaCha20-backed production source.
///
/// One instance lives for an entire session, so draws are never
/// artificially correlated across rounds. A fixed seed gives a
/// reproducible run for simulation.
pub struct EntropyRng {
    rng: ChaCha20Rng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeSource for EntropyRng {
    fn draw_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Error during bet validation or game execution.
///
/// Every variant is a rejected request: nothing is mutated before the
/// check that produces it, so callers can retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The stake exceeds the current balance.
    #[error(transparent)]
    InsufficientBalance(#[from] InsufficientBalance),
    /// A bet parameter is outside its configured bounds.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// The request is not valid in the current game phase.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(&'static str),
}
