//! Integer money.
//!
//! Every price and total is held in cents, so sums and discounts are exact:
//! two items at `$999.99` total `$1999.98`, and 10% off `$100.00` is `$90.00`.
//! Sums and products are checked: amounts past `i64` cents yield `None`
//! rather than wrapping.

use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// ```rust
    /// use ambit_cart::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "$10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// For negative amounts only `major` carries the sign: `(-5, 50)` is `-$5.50`.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_multiply_quantity(self, qty: u32) -> Option<Money> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Price after taking `percent` off, rounded half up to the cent.
    /// `percent` is converted to basis points first (12.5 -> 1250).
    pub fn apply_percentage_discount(&self, percent: f64) -> Money {
        let bps = (percent * 100.0).round() as i128;
        let discount_amount = (self.0 as i128 * bps + 5000) / 10000;
        Money(self.0 - discount_amount as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}
