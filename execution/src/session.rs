//! Single-player session facade.
//!
//! Owns the ledger, the outcome source, the per-game histories, and the
//! mines state machine, and sequences every round the same way:
//! validate, debit the stake, draw, compute the payout, credit on a win,
//! record history. Taking `&mut self` on every mutating operation is the
//! single-caller serialization the engine requires: there is no way to
//! submit a second round while one is resolving.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::casino::mines::{MinesPhase, MinesRound, MinesView, RevealStep};
use crate::casino::{coinflip, dice, EntropyRng, GameError, OutcomeSource};
use retrocade_types::casino::{
    CoinSide, DiceDirection, Draw, GameType, Ledger, RoundHistory, RoundOutcome,
    COINFLIP_MAX_STAKE, COINFLIP_MIN_STAKE, DICE_MAX_STAKE, DICE_MIN_STAKE, MAX_MINES,
    MINES_MAX_STAKE, MINES_MIN_STAKE, MIN_MINES,
};

use serde::{Deserialize, Serialize};

/// Outcome of revealing one mines cell.
///
/// Terminal reveals carry the settled round so the caller can render the
/// loss or the auto-clear win without a second query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum RevealOutcome {
    /// Safe cell; the round continues.
    Safe {
        cell: u8,
        safe_revealed: u8,
        winnings: u64,
    },
    /// Mine hit; the round is lost and the stake forfeited.
    Mine { cell: u8, round: RoundOutcome },
    /// Last safe cell revealed; the round is won and settled.
    Cleared { cell: u8, round: RoundOutcome },
}

/// One player's engine session.
pub struct Session<R: OutcomeSource = EntropyRng> {
    rng: R,
    ledger: Ledger,
    mines: MinesRound,
    coinflip_history: RoundHistory,
    dice_history: RoundHistory,
    mines_history: RoundHistory,
}

impl Session<EntropyRng> {
    /// Open a session with a starting balance in cents.
    pub fn new(initial_balance: u64) -> Self {
        Self::with_source(initial_balance, EntropyRng::new())
    }

    /// Open a session whose draws replay deterministically from a seed.
    pub fn seeded(initial_balance: u64, seed: u64) -> Self {
        Self::with_source(initial_balance, EntropyRng::seeded(seed))
    }
}

impl<R: OutcomeSource> Session<R> {
    /// Open a session around an explicit outcome source.
    pub fn with_source(initial_balance: u64, rng: R) -> Self {
        Self {
            rng,
            ledger: Ledger::new(initial_balance),
            mines: MinesRound::default(),
            coinflip_history: RoundHistory::default(),
            dice_history: RoundHistory::default(),
            mines_history: RoundHistory::default(),
        }
    }

    /// Current balance in cents.
    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    /// Completed rounds for a game, newest first, capped at the history
    /// limit.
    pub fn history(&self, game: GameType) -> &[RoundOutcome] {
        match game {
            GameType::CoinFlip => self.coinflip_history.entries(),
            GameType::Dice => self.dice_history.entries(),
            GameType::Mines => self.mines_history.entries(),
        }
    }

    /// Resolve one coin flip round.
    pub fn place_coinflip_bet(
        &mut self,
        stake: u64,
        chosen: CoinSide,
    ) -> Result<RoundOutcome, GameError> {
        check_stake(stake, COINFLIP_MIN_STAKE, COINFLIP_MAX_STAKE)?;
        self.ledger.debit(stake)?;

        let drawn = self.rng.flip_coin();
        let (won, payout) = coinflip::settle(stake, chosen, drawn);
        Ok(self.settle_round(RoundOutcome {
            game: GameType::CoinFlip,
            stake,
            draw: Draw::Coin { side: drawn },
            won,
            payout,
            timestamp_ms: now_ms(),
        }))
    }

    /// Resolve one dice round.
    pub fn place_dice_bet(
        &mut self,
        stake: u64,
        target: u8,
        direction: DiceDirection,
    ) -> Result<RoundOutcome, GameError> {
        check_stake(stake, DICE_MIN_STAKE, DICE_MAX_STAKE)?;
        dice::validate_target(target)?;
        self.ledger.debit(stake)?;

        let roll = self.rng.roll_hundredths();
        let won = dice::is_win(roll, target, direction);
        let payout = if won {
            dice::payout(stake, target, direction)
        } else {
            0
        };
        Ok(self.settle_round(RoundOutcome {
            game: GameType::Dice,
            stake,
            draw: Draw::Dice { roll },
            won,
            payout,
            timestamp_ms: now_ms(),
        }))
    }

    /// Start a mines round: debit the stake and generate the board.
    pub fn mines_start(&mut self, stake: u64, mine_count: u8) -> Result<MinesView, GameError> {
        if self.mines.phase() != MinesPhase::Setup {
            return Err(GameError::InvalidStateTransition(
                "previous mines round not reset",
            ));
        }
        check_stake(stake, MINES_MIN_STAKE, MINES_MAX_STAKE)?;
        if !(MIN_MINES..=MAX_MINES).contains(&mine_count) {
            return Err(GameError::InvalidParameter(
                "mine count must be within [1, 10]",
            ));
        }
        self.ledger.debit(stake)?;

        self.mines.start(&mut self.rng, stake, mine_count);
        debug!(stake, mine_count, "mines round started");
        Ok(self.mines.view())
    }

    /// Reveal a cell on the active mines board.
    pub fn mines_reveal(&mut self, cell: u8) -> Result<RevealOutcome, GameError> {
        match self.mines.reveal(cell)? {
            RevealStep::Safe {
                safe_revealed,
                winnings,
            } => Ok(RevealOutcome::Safe {
                cell,
                safe_revealed,
                winnings,
            }),
            RevealStep::Mine => {
                let round = self.settle_round(RoundOutcome {
                    game: GameType::Mines,
                    stake: self.mines.stake(),
                    draw: Draw::Mines {
                        mines: self.mines.mine_cells(),
                    },
                    won: false,
                    payout: 0,
                    timestamp_ms: now_ms(),
                });
                Ok(RevealOutcome::Mine { cell, round })
            }
            RevealStep::Cleared { winnings } => {
                let payout = self.mines.stake().saturating_add(winnings);
                let round = self.settle_round(RoundOutcome {
                    game: GameType::Mines,
                    stake: self.mines.stake(),
                    draw: Draw::Mines {
                        mines: self.mines.mine_cells(),
                    },
                    won: true,
                    payout,
                    timestamp_ms: now_ms(),
                });
                Ok(RevealOutcome::Cleared { cell, round })
            }
        }
    }

    /// Cash out the active mines round: credits stake plus winnings.
    pub fn mines_cash_out(&mut self) -> Result<RoundOutcome, GameError> {
        let payout = self.mines.cash_out()?;
        Ok(self.settle_round(RoundOutcome {
            game: GameType::Mines,
            stake: self.mines.stake(),
            draw: Draw::Mines {
                mines: self.mines.mine_cells(),
            },
            won: true,
            payout,
            timestamp_ms: now_ms(),
        }))
    }

    /// Return the mines machine to `Setup`, discarding the board. A round
    /// abandoned from `Playing` forfeits its stake and records nothing.
    pub fn mines_reset(&mut self) {
        if self.mines.phase() == MinesPhase::Playing {
            warn!(
                stake = self.mines.stake(),
                "mines round abandoned; stake forfeited"
            );
        }
        self.mines.reset();
    }

    /// Snapshot of the mines machine.
    pub fn mines(&self) -> MinesView {
        self.mines.view()
    }

    /// Credit a win, record history, and hand the outcome back.
    fn settle_round(&mut self, outcome: RoundOutcome) -> RoundOutcome {
        if outcome.payout > 0 {
            self.ledger.credit(outcome.payout);
        }
        debug!(
            game = ?outcome.game,
            stake = outcome.stake,
            won = outcome.won,
            payout = outcome.payout,
            balance = self.ledger.balance(),
            "round settled"
        );
        let history = match outcome.game {
            GameType::CoinFlip => &mut self.coinflip_history,
            GameType::Dice => &mut self.dice_history,
            GameType::Mines => &mut self.mines_history,
        };
        history.record(outcome.clone());
        outcome
    }
}

/// Reject stakes outside the game's configured bounds.
fn check_stake(stake: u64, min: u64, max: u64) -> Result<(), GameError> {
    if stake < min || stake > max {
        return Err(GameError::InvalidParameter(
            "stake outside configured bounds",
        ));
    }
    Ok(())
}

/// Wall-clock unix milliseconds at settlement.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
