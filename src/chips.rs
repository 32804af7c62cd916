//! Chip amounts.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::str::FromStr;

use crate::error::ParseChipsError;

/// Cents per whole chip.
pub const CENTS_PER_CHIP: u64 = 100;

/// An amount of chips, counted in cents.
///
/// Bets, wagers and balances all use this type, so halving a bet or paying a
/// natural on an odd wager keeps the half chip. `+`, `-` and the
/// `saturating_*` methods clamp to [`Chips::ZERO`] and [`Chips::MAX`].
///
/// ```
/// use bjround::Chips;
///
/// let bet: Chips = "12.5".parse().unwrap();
/// assert_eq!(bet, Chips::from_cents(1250));
/// assert_eq!(bet.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Chips(u64);

impl Chips {
    /// No chips.
    pub const ZERO: Self = Self(0);
    /// Largest representable amount.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates an amount from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole chips, saturating at [`Chips::MAX`].
    #[must_use]
    pub const fn new(chips: u64) -> Self {
        Self(chips.saturating_mul(CENTS_PER_CHIP))
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Returns whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtracts `rhs`, returning `None` if it is larger than `self`.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtracts `rhs`, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies by `factor`, saturating at [`Chips::MAX`].
    #[must_use]
    pub const fn saturating_mul(self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }

    /// Returns half the amount, rounding an odd cent down.
    #[must_use]
    pub const fn half(self) -> Self {
        Self(self.0 / 2)
    }
}

impl Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTS_PER_CHIP,
            self.0 % CENTS_PER_CHIP
        )
    }
}

impl FromStr for Chips {
    type Err = ParseChipsError;

    /// Parses `"12"`, `"12.5"` or `"12.50"`. At most two decimals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        if (whole.is_empty() && fraction.is_empty())
            || fraction.len() > 2
            || !digits(whole)
            || !digits(fraction)
        {
            return Err(ParseChipsError);
        }

        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().map_err(|_| ParseChipsError)?
        };
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| ParseChipsError)? * 10,
            _ => fraction.parse::<u64>().map_err(|_| ParseChipsError)?,
        };

        whole
            .checked_mul(CENTS_PER_CHIP)
            .and_then(|base| base.checked_add(cents))
            .map(Self)
            .ok_or(ParseChipsError)
    }
}
