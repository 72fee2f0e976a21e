//! Mines: a 5x5 board with hidden mines and push-your-luck reveals.
//!
//! Board and revealed set are kept as u32 bitmasks over the 25 cells.
//! Winnings are linear in the number of safe reveals and recomputed from
//! that count on every reveal, never accumulated: after k safe cells,
//! winnings = round(k x base multiplier x stake).

use crate::casino::{GameError, OutcomeSource};
use crate::fixed::Decimal;
use retrocade_types::casino::{
    GRID_CELLS, MAX_MINES, MINES_FALLBACK_MULTIPLIER_TENTHS, MINES_MULTIPLIER_TENTHS, MIN_MINES,
};
use serde::{Deserialize, Serialize};

/// Phases of one mines round.
///
/// `GameOver`, `Cleared`, and `Settled` are terminal; an explicit reset
/// is required before the next stake. Nothing carries over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinesPhase {
    /// No active board; ready to accept a stake.
    #[default]
    Setup,
    /// Board live, reveals and cash-out accepted.
    Playing,
    /// A mine was revealed; the stake is forfeited.
    GameOver,
    /// Every safe cell was revealed; settled as a win.
    Cleared,
    /// Cashed out mid-round; settled as a win.
    Settled,
}

/// Base multiplier for a mine count, in tenths.
///
/// Counts outside the table fall back to the 3-mine value. The session
/// validates [1, 10] before any board exists, so the fallback is a kept
/// legacy default rather than a reachable payout rule.
pub fn base_multiplier_tenths(mine_count: u8) -> u64 {
    match mine_count {
        MIN_MINES..=MAX_MINES => MINES_MULTIPLIER_TENTHS[(mine_count - 1) as usize],
        _ => MINES_FALLBACK_MULTIPLIER_TENTHS,
    }
}

/// Cumulative winnings after `safe_revealed` safe cells, in cents:
/// round(k x base x stake). Linear in k, not compounding.
pub fn winnings(safe_revealed: u8, mine_count: u8, stake: u64) -> u64 {
    let base = Decimal::from_frac(base_multiplier_tenths(mine_count) as i64, 10);
    base.mul_cents(stake.saturating_mul(safe_revealed as u64))
}

/// Draw `count` distinct mine cells, uniform without replacement
/// (repeated cells are redrawn).
fn place_mines<R: OutcomeSource + ?Sized>(rng: &mut R, count: u8) -> u32 {
    let mut mask = 0u32;
    while mask.count_ones() < count as u32 {
        mask |= 1 << rng.pick_cell();
    }
    mask
}

/// Result of revealing one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RevealStep {
    /// Safe cell; the round continues with recomputed winnings.
    Safe { safe_revealed: u8, winnings: u64 },
    /// Hit a mine; the round is lost.
    Mine,
    /// Last safe cell revealed; the round is won at current winnings.
    Cleared { winnings: u64 },
}

/// Caller-facing snapshot of the mines machine. Never exposes the
/// positions of unrevealed mines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinesView {
    pub phase: MinesPhase,
    pub stake: u64,
    pub mine_count: u8,
    /// Cells revealed so far, ascending.
    pub revealed: Vec<u8>,
    pub safe_revealed: u8,
    /// Current winnings in cents (excluding the stake).
    pub winnings: u64,
}

/// One mines round: the mine layout is fixed for the board's lifetime
/// and the revealed set only grows.
#[derive(Clone, Debug, Default)]
pub struct MinesRound {
    phase: MinesPhase,
    stake: u64,
    mine_count: u8,
    mines: u32,
    revealed: u32,
}

impl MinesRound {
    pub fn phase(&self) -> MinesPhase {
        self.phase
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn mine_count(&self) -> u8 {
        self.mine_count
    }

    /// Count of safe cells revealed so far.
    pub fn safe_revealed(&self) -> u8 {
        (self.revealed & !self.mines).count_ones() as u8
    }

    /// Current winnings in cents, recomputed from the safe-reveal count.
    pub fn winnings(&self) -> u64 {
        winnings(self.safe_revealed(), self.mine_count, self.stake)
    }

    /// The mine layout, ascending. Only meaningful once the round ends;
    /// the session records it in the round outcome.
    pub fn mine_cells(&self) -> Vec<u8> {
        cells_of(self.mines)
    }

    pub fn view(&self) -> MinesView {
        MinesView {
            phase: self.phase,
            stake: self.stake,
            mine_count: self.mine_count,
            revealed: cells_of(self.revealed),
            safe_revealed: self.safe_revealed(),
            winnings: self.winnings(),
        }
    }

    /// Start a board with an already-validated stake and mine count.
    /// The session checks the phase and debits the stake first.
    pub(crate) fn start<R: OutcomeSource + ?Sized>(
        &mut self,
        rng: &mut R,
        stake: u64,
        mine_count: u8,
    ) {
        debug_assert_eq!(self.phase, MinesPhase::Setup);
        self.phase = MinesPhase::Playing;
        self.stake = stake;
        self.mine_count = mine_count;
        self.mines = place_mines(rng, mine_count);
        self.revealed = 0;
    }

    /// Reveal a cell, transitioning the phase when the round ends.
    pub(crate) fn reveal(&mut self, cell: u8) -> Result<RevealStep, GameError> {
        if self.phase != MinesPhase::Playing {
            return Err(GameError::InvalidStateTransition(
                "no mines round in progress",
            ));
        }
        if cell >= GRID_CELLS {
            return Err(GameError::InvalidParameter("cell index out of range"));
        }
        let bit = 1u32 << cell;
        if self.revealed & bit != 0 {
            return Err(GameError::InvalidStateTransition("cell already revealed"));
        }

        self.revealed |= bit;
        if self.mines & bit != 0 {
            self.phase = MinesPhase::GameOver;
            return Ok(RevealStep::Mine);
        }

        let safe_revealed = self.safe_revealed();
        let winnings = self.winnings();
        if safe_revealed == GRID_CELLS - self.mine_count {
            self.phase = MinesPhase::Cleared;
            Ok(RevealStep::Cleared { winnings })
        } else {
            Ok(RevealStep::Safe {
                safe_revealed,
                winnings,
            })
        }
    }

    /// Cash out mid-round: valid in `Playing` once at least one safe
    /// cell is revealed. Returns the total credit (stake + winnings).
    pub(crate) fn cash_out(&mut self) -> Result<u64, GameError> {
        if self.phase != MinesPhase::Playing {
            return Err(GameError::InvalidStateTransition(
                "cash-out requires a round in progress",
            ));
        }
        if self.safe_revealed() == 0 {
            return Err(GameError::InvalidStateTransition(
                "cash-out requires at least one safe reveal",
            ));
        }
        let total = self.stake.saturating_add(self.winnings());
        self.phase = MinesPhase::Settled;
        Ok(total)
    }

    /// Discard the board, revealed set, and winnings.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Expand a cell bitmask into ascending indices.
fn cells_of(mask: u32) -> Vec<u8> {
    (0..GRID_CELLS)
        .filter(|&cell| mask & (1u32 << cell) != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ScriptedRng;

    fn playing_round(rng: &mut ScriptedRng, stake: u64, mine_count: u8) -> MinesRound {
        let mut round = MinesRound::default();
        round.start(rng, stake, mine_count);
        round
    }

    #[test]
    fn test_base_multiplier_table() {
        assert_eq!(base_multiplier_tenths(1), 1);
        assert_eq!(base_multiplier_tenths(3), 4);
        assert_eq!(base_multiplier_tenths(10), 35);

        // Out-of-table counts use the 3-mine value
        assert_eq!(base_multiplier_tenths(0), 4);
        assert_eq!(base_multiplier_tenths(24), 4);
    }

    #[test]
    fn test_winnings_linear_in_safe_reveals() {
        // 3 mines at 0.4x, stake 10.00
        assert_eq!(winnings(0, 3, 10_00), 0);
        assert_eq!(winnings(1, 3, 10_00), 4_00);
        assert_eq!(winnings(2, 3, 10_00), 8_00);
        assert_eq!(winnings(5, 3, 10_00), 20_00);

        // 5 mines at 0.9x, stake 3.33: round(2 x 0.9 x 333) = 599
        assert_eq!(winnings(2, 5, 3_33), 5_99);
    }

    #[test]
    fn test_place_mines_redraws_duplicates() {
        // Script a duplicate draw for cell 7; placement must end with
        // three distinct mines.
        let mut rng = ScriptedRng::new([
            ScriptedRng::cell(7),
            ScriptedRng::cell(7),
            ScriptedRng::cell(12),
            ScriptedRng::cell(24),
        ]);
        let mask = place_mines(&mut rng, 3);
        assert_eq!(mask.count_ones(), 3);
        assert_eq!(cells_of(mask), vec![7, 12, 24]);
    }

    #[test]
    fn test_board_invariants_hold_for_every_count() {
        for mine_count in 1..=10u8 {
            let mut rng = crate::casino::EntropyRng::seeded(mine_count as u64);
            let mut round = MinesRound::default();
            round.start(&mut rng, 10_00, mine_count);

            let mines = round.mine_cells();
            assert_eq!(mines.len(), mine_count as usize);
            assert!(mines.iter().all(|&cell| cell < GRID_CELLS));
            // Ascending output implies distinctness
            assert!(mines.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_safe_reveals_then_mine() {
        // Mines at 0, 1, 2; reveal 3 and 4 safely, then hit 0
        let mut rng = ScriptedRng::new([
            ScriptedRng::cell(0),
            ScriptedRng::cell(1),
            ScriptedRng::cell(2),
        ]);
        let mut round = playing_round(&mut rng, 10_00, 3);

        assert_eq!(
            round.reveal(3).expect("safe reveal"),
            RevealStep::Safe {
                safe_revealed: 1,
                winnings: 4_00,
            }
        );
        assert_eq!(
            round.reveal(4).expect("safe reveal"),
            RevealStep::Safe {
                safe_revealed: 2,
                winnings: 8_00,
            }
        );

        assert_eq!(round.reveal(0).expect("mine reveal"), RevealStep::Mine);
        assert_eq!(round.phase(), MinesPhase::GameOver);

        // Terminal: further reveals are rejected
        assert!(matches!(
            round.reveal(5),
            Err(GameError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_reveal_rejects_bad_cells() {
        let mut rng = ScriptedRng::new([ScriptedRng::cell(24)]);
        let mut round = playing_round(&mut rng, 10_00, 1);

        assert!(matches!(
            round.reveal(25),
            Err(GameError::InvalidParameter(_))
        ));

        round.reveal(3).expect("safe reveal");
        assert!(matches!(
            round.reveal(3),
            Err(GameError::InvalidStateTransition(_))
        ));

        // Rejections leave the revealed set unchanged
        assert_eq!(round.safe_revealed(), 1);
    }

    #[test]
    fn test_full_clear_on_last_safe_cell() {
        // One mine at cell 0: revealing cells 1..=24 clears the board
        let mut rng = ScriptedRng::new([ScriptedRng::cell(0)]);
        let mut round = playing_round(&mut rng, 10_00, 1);

        for cell in 1..24 {
            assert!(matches!(
                round.reveal(cell).expect("safe reveal"),
                RevealStep::Safe { .. }
            ));
        }
        let step = round.reveal(24).expect("final reveal");
        assert_eq!(
            step,
            RevealStep::Cleared {
                winnings: winnings(24, 1, 10_00),
            }
        );
        assert_eq!(round.phase(), MinesPhase::Cleared);
    }

    #[test]
    fn test_single_safe_cell_board_clears_immediately() {
        // 24 mines leave exactly one safe cell; its reveal is a clear
        // with one safe cell counted. Board generation itself accepts
        // the count; the [1, 10] rule is the session's concern.
        let mut rng = crate::casino::EntropyRng::seeded(3);
        let mut round = MinesRound::default();
        round.start(&mut rng, 10_00, 24);

        let safe_cell = (0..GRID_CELLS)
            .find(|&cell| !round.mine_cells().contains(&cell))
            .expect("one safe cell");
        let step = round.reveal(safe_cell).expect("reveal safe cell");

        assert_eq!(
            step,
            RevealStep::Cleared {
                winnings: winnings(1, 24, 10_00),
            }
        );
        assert_eq!(round.phase(), MinesPhase::Cleared);
        assert_eq!(round.safe_revealed(), 1);
    }

    #[test]
    fn test_cash_out_requires_progress() {
        let mut rng = ScriptedRng::new([ScriptedRng::cell(0)]);
        let mut round = playing_round(&mut rng, 10_00, 1);

        // Nothing revealed yet
        assert!(matches!(
            round.cash_out(),
            Err(GameError::InvalidStateTransition(_))
        ));

        round.reveal(5).expect("safe reveal");
        let total = round.cash_out().expect("cash out");
        assert_eq!(total, 10_00 + winnings(1, 1, 10_00));
        assert_eq!(round.phase(), MinesPhase::Settled);

        // Settled is terminal until reset
        assert!(round.cash_out().is_err());
        round.reset();
        assert_eq!(round.phase(), MinesPhase::Setup);
        assert_eq!(round.view().revealed, Vec::<u8>::new());
    }
}
