use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::{Eq, Ord, PartialEq, PartialOrd},
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseQuantityError {
    #[error("empty number")]
    Empty,
    #[error("invalid digit in '{0}'")]
    InvalidDigit(String),
    #[error("'{0}' has more than {max} fractional digits", max = Quantity::DECIMALS)]
    TooPrecise(String),
    #[error("'{0}' is out of range")]
    Overflow(String),
}

/// Exact signed decimal with a fixed number of fractional digits.
///
/// Weights, capacities and profits are all carried as `Quantity`, so sums and
/// differences taken along the DP never drift and interval containment can be
/// tested with plain comparisons.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i128);

impl Quantity {
    pub const DECIMALS: u32 = 18;
    const PRECISION: i128 = 10i128.pow(Quantity::DECIMALS);

    pub const ZERO: Quantity = Quantity(0);

    pub fn from_integer(value: i128) -> Self {
        Self(
            value
                .checked_mul(Quantity::PRECISION)
                .expect("Quantity overflow"),
        )
    }

    pub fn checked_from_integer(value: i128) -> Option<Self> {
        value.checked_mul(Quantity::PRECISION).map(Self)
    }

    pub fn from_dec_str(value: &str) -> Result<Self, ParseQuantityError> {
        let trimmed = value.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            None => return Err(ParseQuantityError::Empty),
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            Some(_) => (false, trimmed),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseQuantityError::InvalidDigit(value.to_string()));
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(ParseQuantityError::InvalidDigit(value.to_string()));
        }
        let frac_part = frac_part.trim_end_matches('0');
        if frac_part.len() > Quantity::DECIMALS as usize {
            return Err(ParseQuantityError::TooPrecise(value.to_string()));
        }

        let overflow = || ParseQuantityError::Overflow(value.to_string());
        let mut raw: i128 = 0;
        for b in int_part.bytes() {
            raw = raw
                .checked_mul(10)
                .and_then(|r| r.checked_add((b - b'0') as i128))
                .ok_or_else(overflow)?;
        }
        raw = raw.checked_mul(Quantity::PRECISION).ok_or_else(overflow)?;
        let mut scale = Quantity::PRECISION;
        for b in frac_part.bytes() {
            scale /= 10;
            raw = raw
                .checked_add((b - b'0') as i128 * scale)
                .ok_or_else(overflow)?;
        }
        Ok(Self(if negative { -raw } else { raw }))
    }

    pub fn checked_add(&self, other: &Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }

    pub fn checked_sub(&self, other: &Quantity) -> Option<Quantity> {
        self.0.checked_sub(other.0).map(Quantity)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn is_integral(&self) -> bool {
        self.0 % Quantity::PRECISION == 0
    }

    /// The value as a whole number, if it has no fractional part.
    pub fn to_integer(&self) -> Option<i128> {
        self.is_integral().then(|| self.0 / Quantity::PRECISION)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::from_integer(value as i128)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Self::from_integer(value as i128)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self::from_integer(value as i128)
    }
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let precision = Quantity::PRECISION as u128;
        let int_part = magnitude / precision;
        let frac_part = magnitude % precision;
        if frac_part == 0 {
            write!(f, "{}{}", sign, int_part)
        } else {
            let digits = format!("{:0width$}", frac_part, width = Quantity::DECIMALS as usize);
            write!(f, "{}{}.{}", sign, int_part, digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_dec_str(s.as_str()).map_err(serde::de::Error::custom)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        (&self).add(&other)
    }
}

impl<'a> Add<&'a Quantity> for Quantity {
    type Output = Self;

    fn add(self, other: &'a Self) -> Self {
        (&self).add(other)
    }
}

impl<'a, 'b> Add<&'a Quantity> for &'b Quantity {
    type Output = Quantity;

    fn add(self, other: &'a Quantity) -> Quantity {
        Quantity(self.0.checked_add(other.0).expect("Quantity overflow"))
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        (&self).sub(&other)
    }
}

impl<'a> Sub<&'a Quantity> for Quantity {
    type Output = Self;

    fn sub(self, other: &'a Self) -> Self {
        (&self).sub(other)
    }
}

impl<'a, 'b> Sub<&'a Quantity> for &'b Quantity {
    type Output = Quantity;

    fn sub(self, other: &'a Quantity) -> Quantity {
        Quantity(self.0.checked_sub(other.0).expect("Quantity overflow"))
    }
}

impl Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self {
        Quantity(self.0.checked_neg().expect("Quantity overflow"))
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, other: Self) {
        *self = (&*self).add(&other);
    }
}

impl AddAssign<&Quantity> for Quantity {
    fn add_assign(&mut self, other: &Self) {
        *self = (&*self).add(other);
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, other: Self) {
        *self = (&*self).sub(&other);
    }
}

impl SubAssign<&Quantity> for Quantity {
    fn sub_assign(&mut self, other: &Self) {
        *self = (&*self).sub(other);
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, |acc, x| acc + x)
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, |acc, x| acc + x)
    }
}
