use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (received,
/// receivable, balances) to avoid floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parses user or sheet input, coercing blank or non-numeric text to
    /// zero. This never fails: amounts arrive from freeform cells and an
    /// unreadable value means "nothing recorded", not an error.
    #[must_use]
    pub fn parse_loose(input: &str) -> MoneyCents {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return MoneyCents::ZERO;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => MoneyCents((value * 100.0).round() as i64),
            _ => MoneyCents::ZERO,
        }
    }

    /// Unsigned rendering, fixed to two decimals. Used wherever the sign
    /// is conveyed through a [`BalanceState`] instead of a minus glyph.
    #[must_use]
    pub fn magnitude(self) -> String {
        let abs = self.0.unsigned_abs();
        format!("{}.{:02}", abs / 100, abs % 100)
    }
}

/// Balance of an entry: what was received minus what is still receivable.
#[must_use]
pub fn balance(received: MoneyCents, receivable: MoneyCents) -> MoneyCents {
    received - receivable
}

/// Three-way classification of a balance. Display color is derived from
/// the state, never from a sign glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceState {
    /// Positive balance: the contributor still owes.
    Outstanding,
    /// Negative balance: the contributor overpaid.
    Overpaid,
    /// Zero balance.
    Settled,
}

impl BalanceState {
    #[must_use]
    pub const fn classify(balance: MoneyCents) -> Self {
        if balance.is_positive() {
            Self::Outstanding
        } else if balance.is_negative() {
            Self::Overpaid
        } else {
            Self::Settled
        }
    }

    /// Display color associated with the state.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Outstanding => "red",
            Self::Overpaid => "green",
            Self::Settled => "blue",
        }
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loose_coerces_garbage_to_zero() {
        assert_eq!(MoneyCents::parse_loose(""), MoneyCents::ZERO);
        assert_eq!(MoneyCents::parse_loose("   "), MoneyCents::ZERO);
        assert_eq!(MoneyCents::parse_loose("abc"), MoneyCents::ZERO);
        assert_eq!(MoneyCents::parse_loose("12,5"), MoneyCents::ZERO);
    }

    #[test]
    fn parse_loose_reads_decimals() {
        assert_eq!(MoneyCents::parse_loose("10").cents(), 1000);
        assert_eq!(MoneyCents::parse_loose("10.5").cents(), 1050);
        assert_eq!(MoneyCents::parse_loose(" 0.01 ").cents(), 1);
        assert_eq!(MoneyCents::parse_loose("-3").cents(), -300);
    }

    #[test]
    fn balance_of_blank_receivable_is_received() {
        let received = MoneyCents::parse_loose("42.50");
        assert_eq!(balance(received, MoneyCents::parse_loose("")), received);
        assert_eq!(
            balance(MoneyCents::parse_loose(""), MoneyCents::parse_loose("")),
            MoneyCents::ZERO
        );
    }

    #[test]
    fn classify_covers_all_signs() {
        assert_eq!(
            BalanceState::classify(MoneyCents::new(1)),
            BalanceState::Outstanding
        );
        assert_eq!(
            BalanceState::classify(MoneyCents::new(-1)),
            BalanceState::Overpaid
        );
        assert_eq!(
            BalanceState::classify(MoneyCents::ZERO),
            BalanceState::Settled
        );
        assert_eq!(BalanceState::classify(MoneyCents::new(1)).color(), "red");
        assert_eq!(BalanceState::classify(MoneyCents::new(-1)).color(), "green");
        assert_eq!(BalanceState::classify(MoneyCents::ZERO).color(), "blue");
    }

    #[test]
    fn magnitude_drops_the_sign() {
        assert_eq!(MoneyCents::new(-1250).magnitude(), "12.50");
        assert_eq!(MoneyCents::new(1250).magnitude(), "12.50");
        assert_eq!(MoneyCents::ZERO.magnitude(), "0.00");
    }
}
