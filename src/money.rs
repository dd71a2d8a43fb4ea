//! Fixed-point monetary amounts.
//!
//! Bankrolls and stakes are tracked as whole cents so that repeated payouts
//! never accumulate floating-point drift.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in cents. May be negative only as an intermediate
/// result of arithmetic; bankroll code validates before it debits.
///
/// ```
/// use blackjack_rs::money::Money;
///
/// let bet: Money = "12.50".parse().unwrap();
/// assert_eq!(bet.cents(), 1250);
/// assert_eq!(bet.half().to_string(), "6.25");
/// assert_eq!(bet.three_halves().to_string(), "18.75");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a bankroll or bet may start from: one trillion units.
    /// Leaves enough headroom below `i64::MAX` that payouts on it, and many
    /// rounds of winnings after it, stay exact.
    pub const MAX: Money = Money(100_000_000_000_000);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by a whole factor.
    pub const fn times(self, factor: i64) -> Self {
        Self(self.0.saturating_mul(factor))
    }

    /// Half the amount, rounded down to the cent.
    pub const fn half(self) -> Self {
        Self(self.0.div_euclid(2))
    }

    /// One and a half times the amount (3:2 profit), rounded down to the cent.
    pub const fn three_halves(self) -> Self {
        Self(self.0.saturating_mul(3).div_euclid(2))
    }

    pub fn saturating_sub(self, rhs: Money) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("not a number: '{0}'")]
    Invalid(String),
    #[error("more than two decimal places: '{0}'")]
    TooPrecise(String),
    #[error("amount must not be negative")]
    Negative,
    #[error("amount exceeds {max}: '{input}'")]
    TooLarge { input: String, max: Money },
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().trim_start_matches(['€', '$']).trim();
        if t.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if t.starts_with('-') {
            return Err(MoneyParseError::Negative);
        }
        let (whole, frac) = match t.split_once('.') {
            Some((w, f)) => (w, f),
            None => (t, ""),
        };
        let digits_only = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
            return Err(MoneyParseError::Invalid(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }
        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::Invalid(s.to_string()))?
        };
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| MoneyParseError::Invalid(s.to_string()))? * 10,
            _ => frac.parse().map_err(|_| MoneyParseError::Invalid(s.to_string()))?,
        };
        let too_large = || MoneyParseError::TooLarge { input: s.to_string(), max: Money::MAX };
        let amount = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(too_large)?;
        if amount > Money::MAX {
            return Err(too_large());
        }
        Ok(amount)
    }
}
