//! Exact rational numbers
//!
//! Number lines need exact alignment checks between a line's bounds and its
//! interval, so every value is carried as a reduced numerator/denominator pair
//! instead of a float.

use crate::error::{FormatError, FormatResult};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Places kept when a repeating decimal expansion is cut off
pub const MAX_DECIMAL_DIGITS: usize = 12;

/// A reduced rational number with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i128,
    den: i128,
}

fn gcd(a: i128, b: i128) -> u128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// gcd of two values known to fit, as a divisor of either
fn common(a: i128, b: i128) -> i128 {
    i128::try_from(gcd(a, b)).unwrap_or(1).max(1)
}

fn checked(value: Option<i128>) -> FormatResult<i128> {
    value.ok_or(FormatError::NumberTooLarge)
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };
    pub const ONE: Fraction = Fraction { num: 1, den: 1 };

    /// Create a reduced fraction, failing on a zero denominator
    pub fn new(num: i128, den: i128) -> FormatResult<Self> {
        if den == 0 {
            return Err(FormatError::ZeroDenominator);
        }
        Self::reduced(num, den)
    }

    /// Create a whole number
    pub fn from_integer(value: i128) -> FormatResult<Self> {
        Self::reduced(value, 1)
    }

    // `i128::MIN` is kept out so negation and `abs` never overflow.
    fn reduced(num: i128, den: i128) -> FormatResult<Self> {
        if num == i128::MIN || den == i128::MIN {
            return Err(FormatError::NumberTooLarge);
        }
        let g = common(num, den);
        let (num, den) = (num / g, den / g);
        if den < 0 {
            Ok(Self { num: -num, den: -den })
        } else {
            Ok(Self { num, den })
        }
    }

    pub fn numerator(&self) -> i128 {
        self.num
    }

    pub fn denominator(&self) -> i128 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den,
        }
    }

    /// Largest integer less than or equal to this value
    pub fn floor(&self) -> i128 {
        self.num.div_euclid(self.den)
    }

    /// Split a non-negative magnitude into whole part and proper remainder
    pub fn to_proper(&self) -> (i128, i128, i128) {
        let abs = self.abs();
        (abs.num / abs.den, abs.num % abs.den, abs.den)
    }

    /// Number of fractional digits in the decimal expansion, or `None` when
    /// the expansion repeats forever
    pub fn terminating_digits(&self) -> Option<usize> {
        let mut den = self.den;
        let (mut twos, mut fives) = (0, 0);
        while den % 2 == 0 {
            den /= 2;
            twos += 1;
        }
        while den % 5 == 0 {
            den /= 5;
            fives += 1;
        }
        (den == 1).then_some(twos.max(fives))
    }

    /// Decimal expansion by long division, truncated after `max_digits`
    /// fractional digits. Returns the whole digits and the fractional digits.
    pub fn to_decimal_parts(&self, max_digits: usize) -> (String, String) {
        let abs = self.abs();
        let whole = (abs.num / abs.den).to_string();
        let den = abs.den.unsigned_abs();
        let mut remainder = (abs.num % abs.den).unsigned_abs();
        let mut digits = String::new();
        while remainder != 0 && digits.len() < max_digits {
            // remainder * 10 by repeated addition, staying below `den`
            let mut acc = 0u128;
            let mut digit = 0u8;
            for _ in 0..10 {
                acc += remainder;
                if acc >= den {
                    acc -= den;
                    digit += 1;
                }
            }
            digits.push(char::from(b'0' + digit));
            remainder = acc;
        }
        (whole, digits)
    }

    pub fn checked_add(self, rhs: Self) -> FormatResult<Self> {
        let g = common(self.den, rhs.den);
        let (left, right) = (self.den / g, rhs.den / g);
        let num = checked(
            self.num
                .checked_mul(right)
                .zip(rhs.num.checked_mul(left))
                .and_then(|(a, b)| a.checked_add(b)),
        )?;
        let den = checked(self.den.checked_mul(right))?;
        Self::reduced(num, den)
    }

    pub fn checked_sub(self, rhs: Self) -> FormatResult<Self> {
        self.checked_add(-rhs)
    }

    /// Product, cross-reducing before multiplying
    pub fn checked_mul(self, rhs: Self) -> FormatResult<Self> {
        let g1 = common(self.num, rhs.den);
        let g2 = common(rhs.num, self.den);
        let num = checked((self.num / g1).checked_mul(rhs.num / g2))?;
        let den = checked((self.den / g2).checked_mul(rhs.den / g1))?;
        Self::reduced(num, den)
    }

    pub fn checked_div(self, rhs: Self) -> FormatResult<Self> {
        if rhs.is_zero() {
            return Err(FormatError::ZeroDenominator);
        }
        self.checked_mul(Self::reduced(rhs.den, rhs.num)?)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

fn oriented(ord: Ordering, flipped: bool) -> Ordering {
    if flipped {
        ord.reverse()
    } else {
        ord
    }
}

impl Ord for Fraction {
    /// Compares whole parts, then the reciprocals of the remainders, so no
    /// product is ever formed.
    fn cmp(&self, other: &Self) -> Ordering {
        let (mut a, mut b, mut c, mut d) = (self.num, self.den, other.num, other.den);
        let mut flipped = false;
        loop {
            let (qa, qc) = (a.div_euclid(b), c.div_euclid(d));
            if qa != qc {
                return oriented(qa.cmp(&qc), flipped);
            }
            let (ra, rc) = (a.rem_euclid(b), c.rem_euclid(d));
            match (ra, rc) {
                (0, 0) => return Ordering::Equal,
                (0, _) => return oriented(Ordering::Less, flipped),
                (_, 0) => return oriented(Ordering::Greater, flipped),
                _ => {
                    // ra/b < rc/d exactly when b/ra > d/rc
                    (a, b, c, d) = (b, ra, d, rc);
                    flipped = !flipped;
                }
            }
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Fraction {
    type Output = FormatResult<Fraction>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for Fraction {
    type Output = FormatResult<Fraction>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl Mul for Fraction {
    type Output = FormatResult<Fraction>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
    }
}

impl Div for Fraction {
    type Output = FormatResult<Fraction>;

    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Self::Output {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i128, d: i128) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_reduction_and_sign() {
        let f = frac(6, -8);
        assert_eq!(f.numerator(), -3);
        assert_eq!(f.denominator(), 4);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Fraction::new(1, 0), Err(FormatError::ZeroDenominator));
        assert!((Fraction::ONE / Fraction::ZERO).is_err());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!((frac(1, 2) + frac(1, 3)).unwrap(), frac(5, 6));
        assert_eq!((frac(1, 2) - frac(3, 4)).unwrap(), frac(-1, 4));
        assert_eq!((frac(2, 3) * frac(3, 4)).unwrap(), frac(1, 2));
        assert_eq!((frac(5, 1) / frac(2, 1)).unwrap(), frac(5, 2));
        assert_eq!((frac(1, 2) / frac(-1, 4)).unwrap(), frac(-2, 1));
    }

    #[test]
    fn test_cross_reduction_avoids_overflow() {
        let big = 999_999_999_999_999_989_i128;
        let huge = frac(big * big, 7);
        assert_eq!((huge * frac(7, big)).unwrap(), frac(big, 1));
        assert_eq!((huge / frac(big, 7)).unwrap(), frac(big, 1));
        assert_eq!((frac(1, big) + frac(1, big)).unwrap(), frac(2, big));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let max = Fraction::from_integer(i128::MAX).unwrap();
        assert_eq!(max + Fraction::ONE, Err(FormatError::NumberTooLarge));
        assert_eq!(-max - Fraction::ONE, Err(FormatError::NumberTooLarge));
        assert_eq!(max * frac(2, 1), Err(FormatError::NumberTooLarge));
        let (p, q) = (999_999_999_999_999_989_i128, 999_999_999_999_999_979_i128);
        let tiny = frac(1, p * q);
        assert_eq!(tiny / frac(1_000_000_007, 1), Err(FormatError::NumberTooLarge));
        assert_eq!(Fraction::from_integer(i128::MIN), Err(FormatError::NumberTooLarge));
    }

    #[test]
    fn test_floor() {
        assert_eq!(frac(5, 2).floor(), 2);
        assert_eq!(frac(-5, 2).floor(), -3);
        assert_eq!(frac(4, 1).floor(), 4);
    }

    #[test]
    fn test_ordering_is_exact() {
        assert!(frac(1, 3) < frac(334, 1000));
        assert!(frac(-1, 2) < frac(-1, 3));
        assert_eq!(frac(2, 4).cmp(&frac(1, 2)), Ordering::Equal);
        assert!(frac(-3, 2) < frac(-4, 3));
        assert!(frac(7, 1) > frac(13, 2));
    }

    #[test]
    fn test_ordering_near_the_integer_limit() {
        let (p, q) = (999_999_999_999_999_989_i128, 999_999_999_999_999_979_i128);
        let max = i128::MAX;
        assert!(frac(max - 2, max - 1) < frac(max - 1, max));
        assert!(frac(1, p * q) < frac(1, p * q - 1));
        assert!(frac(-1, p * q) > frac(-1, p * q - 1));
        assert!(frac(p, q) > Fraction::ONE);
    }

    #[test]
    fn test_decimal_parts() {
        assert_eq!(frac(3, 2).to_decimal_parts(12), ("1".to_string(), "5".to_string()));
        assert_eq!(frac(1, 8).to_decimal_parts(12), ("0".to_string(), "125".to_string()));
        assert_eq!(frac(1, 3).to_decimal_parts(4), ("0".to_string(), "3333".to_string()));
        assert_eq!(frac(-7, 4).to_decimal_parts(12), ("1".to_string(), "75".to_string()));
        let near_max = frac(i128::MAX - 1, i128::MAX);
        assert_eq!(near_max.to_decimal_parts(3).1, "999");
    }

    #[test]
    fn test_terminating_digits() {
        assert_eq!(frac(1, 8).terminating_digits(), Some(3));
        assert_eq!(frac(3, 40).terminating_digits(), Some(3));
        assert_eq!(frac(5, 1).terminating_digits(), Some(0));
        assert_eq!(frac(1, 10_i128.pow(18)).terminating_digits(), Some(18));
        assert_eq!(frac(1, 3).terminating_digits(), None);
        assert_eq!(frac(7, 12).terminating_digits(), None);
    }

    #[test]
    fn test_proper_split() {
        assert_eq!(frac(7, 3).to_proper(), (2, 1, 3));
        assert_eq!(frac(-7, 3).to_proper(), (2, 1, 3));
    }
}
