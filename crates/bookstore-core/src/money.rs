//! # Money Module
//!
//! Provides the `Money` type for book prices and cart totals.
//!
//! ## Why Ten-Thousandths?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE SUB-CENT TAX PROBLEM                                               │
//! │                                                                         │
//! │  Cart: 19.99 × 2 + 29.99 × 1 = 69.97                                    │
//! │  Tax at 10%:                  = 6.997   ← three decimal places!         │
//! │  Total:                       = 76.967                                  │
//! │                                                                         │
//! │  Integer cents would have to round the tax to 7.00 and the total to    │
//! │  76.97 before anyone asked for rounding.                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer ten-thousandths of a unit                       │
//! │    19.99   → 199_900                                                    │
//! │    6.997   →  69_970   (exact)                                          │
//! │    Rounding to cents happens only when the value is displayed.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The catalog API and the persisted cart carry prices as JSON numbers
//! (`"value": 15.99`). `Money` serializes to and from that decimal form, so
//! floats exist only at the serde boundary and never in arithmetic.
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::from_cents(1999); // $19.99
//! let line = price * 2i64;              // $39.98
//! assert_eq!(line.to_string(), "$39.98");
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

/// Number of raw units in one whole currency unit.
pub const MONEY_SCALE: i64 = 10_000;

/// Raw units per cent.
const RAW_PER_CENT: i64 = MONEY_SCALE / 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in ten-thousandths of the currency unit.
///
/// ## Where Money is Used
/// ```text
/// Book.value ──► CartLineItem::line_total ──► CartStore::subtotal
///                                                  │
///                                                  ├──► tax (× rate)
///                                                  │
///                                                  └──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from raw ten-thousandths.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let tax = Money::from_raw(69_970); // 6.997
    /// assert_eq!(tax.raw(), 69_970);
    /// ```
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Money(raw)
    }

    /// Creates a Money value from whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1599).raw(), 159_900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * RAW_PER_CENT)
    }

    /// Converts a decimal amount (as found in JSON) into Money.
    ///
    /// Rounds to the nearest ten-thousandth. Only the serde boundary and
    /// config parsing should need this.
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * MONEY_SCALE as f64).round() as i64)
    }

    /// Returns the raw value in ten-thousandths.
    #[inline]
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal number (for the wire format only).
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::from_raw(769_670).to_decimal(), 76.967);
    /// ```
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / MONEY_SCALE as f64
    }

    /// Returns the value rounded to whole cents, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::from_raw(69_970).rounded_cents(), 700);
    /// assert_eq!(Money::from_raw(-69_950).rounded_cents(), -700);
    /// ```
    pub const fn rounded_cents(&self) -> i64 {
        let half = RAW_PER_CENT / 2;
        if self.0 < 0 {
            self.0.saturating_sub(half) / RAW_PER_CENT
        } else {
            self.0.saturating_add(half) / RAW_PER_CENT
        }
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax at the given rate.
    ///
    /// ## Implementation
    /// Integer math on raw units: `(amount * bps + 5000) / 10000`.
    /// At four decimal places a 10% rate is always exact, so the rounding
    /// term only matters for odd rates like 8.25%.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    /// use bookstore_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(6997); // 69.97
    /// let tax = subtotal.calculate_tax(TaxRate::STANDARD);
    /// assert_eq!(tax.raw(), 69_970); // 6.997
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large carts can't overflow mid-multiplication
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(tax.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Book: The Great Gatsby 15.99
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 47.97
    /// ```
    ///
    /// Quantities are unbounded, so the product saturates at the `i64`
    /// limits instead of wrapping.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to cents, e.g. `$76.97`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.rounded_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Serde (decimal on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(de::Error::custom("money amount must be a finite number"));
        }
        Ok(Money::from_decimal(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
