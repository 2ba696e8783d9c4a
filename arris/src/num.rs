//! Exact rational arithmetic over arbitrary-precision integers.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// An immutable rational in lowest terms.
///
/// Invariants: the denominator is positive, `gcd(|num|, den) = 1`, and zero
/// is always stored as `0/1`. Every operation returns a fresh normalized
/// value, so equality and hashing work directly on the `(num, den)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rat {
    num: BigInt,
    den: BigInt,
}

impl Rat {
    /// Builds `num/den`, reducing to canonical form. A zero denominator is
    /// an arithmetic fault.
    pub fn new(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(Error::ZeroDenominator);
        }
        Ok(Self::normalized(num, den))
    }

    /// Normalizes a ratio with a known-nonzero denominator.
    fn normalized(mut num: BigInt, mut den: BigInt) -> Self {
        debug_assert!(!den.is_zero(), "denominator must be nonzero");
        if den.sign() == Sign::Minus {
            num = -num;
            den = -den;
        }
        let g = num.gcd(&den);
        Self {
            num: num / &g,
            den: den / g,
        }
    }

    pub fn from_integer(value: BigInt) -> Self {
        Self {
            num: value,
            den: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    #[inline(always)]
    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    #[inline(always)]
    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// True when the value has denominator 1.
    #[inline(always)]
    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    pub fn signum(&self) -> i32 {
        match self.num.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    pub fn abs(&self) -> Self {
        if self.signum() < 0 { -self } else { self.clone() }
    }

    /// Exact division; `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Rat) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self::normalized(
            &self.num * &rhs.den,
            &self.den * &rhs.num,
        ))
    }
}

impl Add for &Rat {
    type Output = Rat;

    fn add(self, rhs: &Rat) -> Rat {
        Rat::normalized(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl Sub for &Rat {
    type Output = Rat;

    fn sub(self, rhs: &Rat) -> Rat {
        Rat::normalized(
            &self.num * &rhs.den - &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl Mul for &Rat {
    type Output = Rat;

    fn mul(self, rhs: &Rat) -> Rat {
        Rat::normalized(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Div for &Rat {
    type Output = Rat;

    /// Panics on a zero divisor; use [`Rat::checked_div`] when the divisor
    /// has not already been sign-tested.
    fn div(self, rhs: &Rat) -> Rat {
        match self.checked_div(rhs) {
            Some(value) => value,
            None => panic!("division by zero rational"),
        }
    }
}

impl Neg for &Rat {
    type Output = Rat;

    fn neg(self) -> Rat {
        Rat {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident, $method:ident;)*) => {$(
        impl $trait for Rat {
            type Output = Rat;

            fn $method(self, rhs: Rat) -> Rat {
                $trait::$method(&self, &rhs)
            }
        }
    )*};
}

forward_owned_binop! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
}

impl Neg for Rat {
    type Output = Rat;

    fn neg(self) -> Rat {
        -&self
    }
}

impl From<i64> for Rat {
    fn from(value: i64) -> Self {
        Self::from_integer(BigInt::from(value))
    }
}

impl Ord for Rat {
    /// Total order by cross-multiplication; denominators are positive, so
    /// no division is needed.
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl PartialOrd for Rat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for Rat {
    type Err = Error;

    /// Accepts `p` or `p/q` with surrounding whitespace tolerated.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidNumber {
            token: s.to_string(),
        };
        let (num, den) = match s.trim().split_once('/') {
            Some((p, q)) => (p.trim(), q.trim()),
            None => (s.trim(), "1"),
        };
        let num: BigInt = num.parse().map_err(|_| bad())?;
        let den: BigInt = den.parse().map_err(|_| bad())?;
        Self::new(num, den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64, q: i64) -> Rat {
        Rat::new(BigInt::from(p), BigInt::from(q)).expect("nonzero denominator")
    }

    #[test]
    fn construction_normalizes() {
        assert_eq!(rat(2, 4), rat(1, 2));
        assert_eq!(rat(1, -2), rat(-1, 2));
        assert_eq!(rat(-3, -6), rat(1, 2));
        assert_eq!(rat(0, 7), Rat::zero());
        assert_eq!(rat(0, -7).denom(), &BigInt::one());
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(
            Rat::new(BigInt::one(), BigInt::zero()),
            Err(Error::ZeroDenominator)
        );
    }

    #[test]
    fn field_laws() {
        let a = rat(3, 4);
        let b = rat(-5, 6);
        let c = rat(7, 2);
        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        assert_eq!(&a - &a, Rat::zero());
        assert_eq!(&a * &Rat::zero(), Rat::zero());
        assert_eq!(&a * &(&Rat::one() / &a), Rat::one());
    }

    #[test]
    fn compare_is_total_and_consistent_with_equality() {
        let a = rat(1, 3);
        let b = rat(2, 6);
        let c = rat(1, 2);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert!(a < c);
        assert!(rat(-1, 2) < Rat::zero());
    }

    #[test]
    fn equal_values_hash_equally() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(rat(2, 4));
        assert!(set.contains(&rat(1, 2)));
    }

    #[test]
    fn checked_div_rejects_zero() {
        assert_eq!(rat(1, 2).checked_div(&Rat::zero()), None);
        assert_eq!(rat(1, 2).checked_div(&rat(1, 4)), Some(rat(2, 1)));
    }

    #[test]
    fn signum_and_abs() {
        assert_eq!(rat(-7, 3).signum(), -1);
        assert_eq!(Rat::zero().signum(), 0);
        assert_eq!(rat(7, 3).signum(), 1);
        assert_eq!(rat(-7, 3).abs(), rat(7, 3));
    }

    #[test]
    fn parse_and_display_round_trip() {
        for text in ["0", "-12", "3/4", "-22/7", "1000000000000000000000/3"] {
            let value: Rat = text.parse().expect("parses");
            assert_eq!(value.to_string(), text);
        }
        assert_eq!(" 6/8 ".parse::<Rat>().expect("parses"), rat(3, 4));
        assert_eq!("4/2".parse::<Rat>().expect("parses").to_string(), "2");
        assert!("1/0".parse::<Rat>().is_err());
        assert!("a/b".parse::<Rat>().is_err());
        assert!("".parse::<Rat>().is_err());
    }
}
