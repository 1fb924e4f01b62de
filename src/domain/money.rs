//! Fixed-point money. Amounts are whole cents so totals never drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Non-negative money amount in cents. Displays with exactly two decimals ("19.75").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest amount a single expense may carry: $10,000,000,000.00.
    pub const MAX_ENTRY: Amount = Amount(1_000_000_000_000);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Parse a spoken/typed amount such as `20`, `$12.5`, `7.25` or `3.999`.
    ///
    /// A leading `$` and trailing punctuation are ignored. More than two
    /// fractional digits round half-up to the cent. Negative, non-numeric
    /// or above [`Amount::MAX_ENTRY`] tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let t = token
            .trim()
            .trim_start_matches('$')
            .trim_end_matches([',', '.', '!', '?', ';', ':']);
        if t.is_empty() {
            return None;
        }
        let (whole, frac) = match t.split_once('.') {
            Some((w, f)) => (w, f),
            None => (t, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };
        let digits: Vec<i64> = frac
            .chars()
            .filter_map(|c| c.to_digit(10).map(i64::from))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);
        let cents = whole
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
        (cents <= Self::MAX_ENTRY.0).then_some(Self(cents))
    }

    /// First token in `text` that parses as an amount.
    pub fn find_in(text: &str) -> Option<Self> {
        text.split_whitespace().find_map(Self::parse)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!(Amount::parse("20"), Some(Amount::from_cents(2000)));
        assert_eq!(Amount::parse("$12.5"), Some(Amount::from_cents(1250)));
        assert_eq!(Amount::parse("7.25,"), Some(Amount::from_cents(725)));
        assert_eq!(Amount::parse(".5"), Some(Amount::from_cents(50)));
        assert_eq!(Amount::parse("20."), Some(Amount::from_cents(2000)));
    }

    #[test]
    fn rounds_extra_fraction_digits() {
        assert_eq!(Amount::parse("3.999"), Some(Amount::from_cents(400)));
        assert_eq!(Amount::parse("3.994"), Some(Amount::from_cents(399)));
    }

    #[test]
    fn rejects_non_amounts() {
        assert_eq!(Amount::parse("food"), None);
        assert_eq!(Amount::parse("-5"), None);
        assert_eq!(Amount::parse("$"), None);
        assert_eq!(Amount::parse("1.2.3"), None);
    }

    #[test]
    fn caps_single_entries() {
        assert_eq!(Amount::parse("10000000000"), Some(Amount::MAX_ENTRY));
        assert_eq!(Amount::parse("10000000000.01"), None);
        assert_eq!(Amount::parse("90000000000000000"), None);
        assert_eq!(Amount::find_in("add expense 90000000000000000 on food"), None);
    }

    #[test]
    fn arithmetic_saturates() {
        let huge = Amount::from_cents(i64::MAX - 1);
        let total: Amount = [huge, huge, Amount::from_cents(5)].iter().sum();
        assert_eq!(total, Amount::from_cents(i64::MAX));
        assert_eq!(
            Amount::from_cents(i64::MIN + 1) - huge,
            Amount::from_cents(i64::MIN)
        );
    }

    #[test]
    fn finds_first_amount_in_sentence() {
        assert_eq!(
            Amount::find_in("add expense spent 20 on food"),
            Some(Amount::from_cents(2000))
        );
        assert_eq!(Amount::find_in("add expense"), None);
    }

    #[test]
    fn sums_and_formats_two_decimals() {
        let total: Amount = [Amount::from_cents(1250), Amount::from_cents(725)]
            .iter()
            .sum();
        assert_eq!(total.to_string(), "19.75");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!((Amount::from_cents(100) - Amount::from_cents(250)).to_string(), "-1.50");
    }
}
