//! Over/under dice.
//!
//! The player picks a target in [1, 99] and a direction; the roll is a
//! hundredths value over [0, 100.00). The multiplier is 98 divided by
//! the win chance percentage, so every target/direction combination
//! carries the same 2% house edge.

use crate::casino::GameError;
use crate::fixed::Decimal;
use retrocade_types::casino::{
    DiceDirection, DICE_MAX_TARGET, DICE_MIN_TARGET, DICE_RTP_PERCENT,
};

/// Reject targets outside [1, 99]. Inside the range the win chance is
/// always at least 1%, which bounds the multiplier at 98x; no target can
/// produce a zero or undefined win chance.
pub fn validate_target(target: u8) -> Result<(), GameError> {
    if !(DICE_MIN_TARGET..=DICE_MAX_TARGET).contains(&target) {
        return Err(GameError::InvalidParameter(
            "dice target must be within [1, 99]",
        ));
    }
    Ok(())
}

/// Win chance as a whole percentage in [1, 99].
pub fn win_chance_percent(target: u8, direction: DiceDirection) -> u64 {
    match direction {
        DiceDirection::Over => 100 - target as u64,
        DiceDirection::Under => target as u64,
    }
}

/// Payout multiplier at 4-decimal precision: 98 / win chance.
pub fn multiplier(target: u8, direction: DiceDirection) -> Decimal {
    let chance = win_chance_percent(target, direction);
    Decimal::from_frac(DICE_RTP_PERCENT as i64, chance as i64)
}

/// Strict comparison on the hundredths roll: over wins above the target,
/// under wins below it. Landing exactly on the target loses either way.
pub fn is_win(roll: u16, target: u8, direction: DiceDirection) -> bool {
    let target = target as u16 * 100;
    match direction {
        DiceDirection::Over => roll > target,
        DiceDirection::Under => roll < target,
    }
}

/// Payout in cents for a winning roll, rounded to whole cents.
pub fn payout(stake: u64, target: u8, direction: DiceDirection) -> u64 {
    multiplier(target, direction).mul_cents(stake)
}
