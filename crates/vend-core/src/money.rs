//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Units                                            │
//! │    The machine deals in whole currency units only (prices like $32),   │
//! │    so Money is a plain i64 count of units. No cents, no rounding.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::Money;
//!
//! let price = Money::from_units(32);
//! let inserted = Money::from_units(40);
//!
//! let change = inserted - price;
//! assert_eq!(change.units(), 8);
//! assert_eq!(change.to_string(), "$8");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: lets validation express "a negative amount was
///   offered" instead of silently wrapping at the API boundary
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **`#[serde(transparent)]`**: serializes as a bare integer, so persisted
///   snapshots and response payloads stay plain JSON numbers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a monetary value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the raw unit count.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Subtraction that reports underflow instead of going negative.
    ///
    /// Used where a negative result would be an invariant violation
    /// (change on a purchase), so the caller can assert on `None`.
    #[inline]
    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        if self.0 >= rhs.0 {
            Some(Money(self.0 - rhs.0))
        } else {
            None
        }
    }

    /// Difference floored at zero.
    ///
    /// Used for display previews ("change so far") where a shortfall
    /// simply reads as $0.
    #[inline]
    pub const fn saturating_sub(self, rhs: Money) -> Money {
        if self.0 >= rhs.0 {
            Money(self.0 - rhs.0)
        } else {
            Money(0)
        }
    }
}

// =============================================================================
// Arithmetic Operators
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Money {
    /// Formats as `$N` (or `-$N` for negative values).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-${}", -self.0)
        } else {
            write!(f, "${}", self.0)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_units(20);
        let b = Money::from_units(12);

        assert_eq!((a + b).units(), 32);
        assert_eq!((a - b).units(), 8);

        let mut c = a;
        c += b;
        assert_eq!(c.units(), 32);
    }

    #[test]
    fn test_checked_sub() {
        let inserted = Money::from_units(40);
        let price = Money::from_units(32);

        assert_eq!(inserted.checked_sub(price), Some(Money::from_units(8)));
        assert_eq!(price.checked_sub(inserted), None);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let inserted = Money::from_units(10);
        let price = Money::from_units(32);

        assert_eq!(inserted.saturating_sub(price), Money::zero());
        assert_eq!(price.saturating_sub(inserted), Money::from_units(22));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(32).to_string(), "$32");
        assert_eq!(Money::zero().to_string(), "$0");
        assert_eq!(Money::from_units(-5).to_string(), "-$5");
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_units(25)).unwrap();
        assert_eq!(json, "25");

        let back: Money = serde_json::from_str("25").unwrap();
        assert_eq!(back, Money::from_units(25));
    }
}
