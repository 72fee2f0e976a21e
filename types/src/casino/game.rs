use serde::{Deserialize, Serialize};

/// Game variants offered by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    CoinFlip,
    Dice,
    Mines,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::CoinFlip, GameType::Dice, GameType::Mines];
}

/// Coin flip sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Over/under direction for a dice bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceDirection {
    Over,
    Under,
}

/// The raw random outcome committed for a round.
///
/// Dice rolls are stored in hundredths (7550 = 75.50) so settlement math
/// stays in integers; mine layouts list the mined cell indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Draw {
    Coin { side: CoinSide },
    Dice { roll: u16 },
    Mines { mines: Vec<u8> },
}

/// Record of one settled round. Immutable once produced; owned by the
/// session, appended to history, and returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub game: GameType,
    /// Stake debited at round start, in cents.
    pub stake: u64,
    pub draw: Draw,
    pub won: bool,
    /// Amount credited back on settlement, in cents. Zero on a loss.
    pub payout: u64,
    /// Unix timestamp in milliseconds at settlement.
    pub timestamp_ms: u64,
}
