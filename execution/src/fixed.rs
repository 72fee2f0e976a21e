//! Fixed-point arithmetic for payout math.
//!
//! Multipliers are held at 4 decimal places (scale 10 000), matching the
//! precision the dice multiplier is quoted at; conversions to whole cents
//! round half away from zero. No floats touch settlement.

// Scaling factor for fixed-point arithmetic (4 decimal places)
pub const SCALE: i64 = 10_000;

/// Fixed-point number with 4 decimal places of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(i64);

impl Decimal {
    /// Create from an integer value.
    pub fn from_int(value: i64) -> Self {
        Decimal(value * SCALE)
    }

    /// Create from a fraction, rounded to 4 decimal places.
    /// The denominator must be positive.
    pub fn from_frac(numerator: i64, denominator: i64) -> Self {
        debug_assert!(denominator > 0);
        let scaled = numerator as i128 * SCALE as i128;
        Decimal(div_rounded(scaled, denominator as i128) as i64)
    }

    /// Multiply an amount in cents, rounding to whole cents.
    /// Negative products clamp to zero.
    pub fn mul_cents(self, cents: u64) -> u64 {
        let product = cents as i128 * self.0 as i128;
        let rounded = div_rounded(product, SCALE as i128);
        u64::try_from(rounded).unwrap_or(0)
    }

    /// The raw scaled value.
    pub fn raw(self) -> i64 {
        self.0
    }
}

/// Divide, rounding half away from zero.
fn div_rounded(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}
