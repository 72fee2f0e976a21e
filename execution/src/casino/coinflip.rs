//! Coin flip: one draw, fixed 2x payout.
//!
//! The 50/50 draw against a flat 2x return carries zero house edge. That
//! is the intended baseline for this variant, not an oversight; the edge
//! lives in the other games.

use retrocade_types::casino::CoinSide;

/// Flat payout multiplier on a win.
const PAYOUT_MULTIPLIER: u64 = 2;

/// Settle a flip: win iff the drawn side matches the chosen side.
/// Returns the win flag and the payout in cents (zero on a loss).
pub fn settle(stake: u64, chosen: CoinSide, drawn: CoinSide) -> (bool, u64) {
    if chosen == drawn {
        (true, stake.saturating_mul(PAYOUT_MULTIPLIER))
    } else {
        (false, 0)
    }
}
