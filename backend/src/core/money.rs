//! Fixed-point money
//!
//! Every amount inside the ledger is an `i64` count of cents. Decimal values
//! only exist at the boundary with the caller (UI, FFI, CLI scripts) and are
//! converted here, once, by rounding to the nearest cent.
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. A balance is "settled" when its magnitude is below
//!    [`SETTLED_EPSILON_CENTS`], which for whole cents means exactly zero
//! 3. Conversion never silently accepts NaN or infinity

use thiserror::Error;

/// Balances smaller than this (in cents) count as settled.
pub const SETTLED_EPSILON_CENTS: i64 = 1;

/// Maximum allowed deviation of the sum of net balances from zero (cents).
pub const BALANCE_TOLERANCE_CENTS: i64 = 1;

/// Cents per currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

// Worst-case error of `amount * 100`, in ULPs of the product.
const REPRESENTATION_ULPS: f64 = 4.0;

// 2^53: beyond this an f64 can no longer represent every whole cent.
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// Errors raised when a decimal amount cannot be represented in cents
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("Amount is not a finite number: {0}")]
    NonFinite(f64),

    #[error("Amount {0} is outside the representable range")]
    OutOfRange(f64),
}

/// Convert a decimal amount (e.g. `12.5`) to cents (`1250`).
///
/// Rounds half away from zero to the nearest cent.
///
/// # Example
/// ```
/// use poker_ledger_core::core::money::cents_from_decimal;
///
/// assert_eq!(cents_from_decimal(20.0).unwrap(), 2000);
/// assert_eq!(cents_from_decimal(0.105).unwrap(), 11);
/// assert!(cents_from_decimal(f64::NAN).is_err());
/// ```
pub fn cents_from_decimal(amount: f64) -> Result<i64, MoneyError> {
    if !amount.is_finite() {
        return Err(MoneyError::NonFinite(amount));
    }

    // 10.005 is stored as 10.00499999..., so the scaled value can land a few
    // ULPs short of the half-cent. Nudge by that much and no more.
    let scaled = amount * CENTS_PER_UNIT as f64;
    let nudge = scaled.abs() * f64::EPSILON * REPRESENTATION_ULPS;
    let rounded = (scaled + scaled.signum() * nudge).round();

    if rounded.abs() > MAX_EXACT_CENTS {
        return Err(MoneyError::OutOfRange(amount));
    }

    Ok(rounded as i64)
}

/// Convert cents back to a decimal amount for display.
///
/// # Example
/// ```
/// use poker_ledger_core::core::money::cents_to_decimal;
///
/// assert_eq!(cents_to_decimal(1250), 12.5);
/// assert_eq!(cents_to_decimal(-30), -0.3);
/// ```
pub fn cents_to_decimal(cents: i64) -> f64 {
    cents as f64 / CENTS_PER_UNIT as f64
}

/// True when the amount is too small to matter (settled).
pub fn is_negligible(cents: i64) -> bool {
    cents.abs() < SETTLED_EPSILON_CENTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_units() {
        assert_eq!(cents_from_decimal(0.0).unwrap(), 0);
        assert_eq!(cents_from_decimal(40.0).unwrap(), 4000);
        assert_eq!(cents_from_decimal(-30.0).unwrap(), -3000);
    }

    #[test]
    fn test_fractional_rounding() {
        assert_eq!(cents_from_decimal(0.1 + 0.2).unwrap(), 30);
        assert_eq!(cents_from_decimal(19.999).unwrap(), 2000);
        assert_eq!(cents_from_decimal(-0.105).unwrap(), -11);
    }

    #[test]
    fn test_half_cent_boundary() {
        // Stored just below the half-cent, meant as exactly the half-cent
        assert_eq!(cents_from_decimal(10.005).unwrap(), 1001);
        assert_eq!(cents_from_decimal(1.005).unwrap(), 101);

        // Genuinely below the half-cent
        assert_eq!(cents_from_decimal(0.0049999995).unwrap(), 0);
        assert_eq!(cents_from_decimal(-0.0049999995).unwrap(), 0);
        assert_eq!(cents_from_decimal(12.344999).unwrap(), 1234);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(
            cents_from_decimal(f64::INFINITY),
            Err(MoneyError::NonFinite(f64::INFINITY))
        );
        assert!(matches!(
            cents_from_decimal(f64::NAN),
            Err(MoneyError::NonFinite(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(cents_from_decimal(1e17), Err(MoneyError::OutOfRange(1e17)));
    }

    #[test]
    fn test_negligible() {
        assert!(is_negligible(0));
        assert!(!is_negligible(1));
        assert!(!is_negligible(-1));
    }
}
