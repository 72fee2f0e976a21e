//! Engine tunables. All currency amounts are u64 cents.

/// Default starting balance for a new session
pub const STARTING_BALANCE: u64 = 1_000_00;

/// Coin flip stake bounds
pub const COINFLIP_MIN_STAKE: u64 = 10_00;
pub const COINFLIP_MAX_STAKE: u64 = 500_00;

/// Dice stake bounds
pub const DICE_MIN_STAKE: u64 = 1_00;
pub const DICE_MAX_STAKE: u64 = 500_00;

/// Mines stake bounds
pub const MINES_MIN_STAKE: u64 = 5_00;
pub const MINES_MAX_STAKE: u64 = 500_00;

/// Mines board size (5x5 grid)
pub const GRID_CELLS: u8 = 25;

/// Allowed mine counts per board
pub const MIN_MINES: u8 = 1;
pub const MAX_MINES: u8 = 10;

/// Base payout multiplier per mine count, in tenths (index 0 = 1 mine).
/// Steeper than linear as mine count rises.
pub const MINES_MULTIPLIER_TENTHS: [u64; 10] = [1, 2, 4, 6, 9, 12, 16, 21, 27, 35];

/// Multiplier used for mine counts outside the table (the 3-mine value).
/// Unreachable behind [MIN_MINES, MAX_MINES] validation; kept as the
/// legacy default rather than extrapolated.
pub const MINES_FALLBACK_MULTIPLIER_TENTHS: u64 = 4;

/// Dice target bounds; both directions keep the win chance inside [1, 99]%
pub const DICE_MIN_TARGET: u8 = 1;
pub const DICE_MAX_TARGET: u8 = 99;

/// Return-to-player percentage baked into the dice multiplier (2% house edge)
pub const DICE_RTP_PERCENT: u64 = 98;

/// Dice rolls are quantized to hundredths over [0, 100.00)
pub const DICE_ROLL_STEPS: u16 = 10_000;

/// Completed rounds retained per game type
pub const HISTORY_LIMIT: usize = 10;
