//! Rational Component - numeric text as entered for number lines
//!
//! A component keeps the digit strings the transcriber typed (whole part,
//! decimal digits, numerator, denominator) next to the number kind they
//! were entered as, and converts to an exact [`Fraction`] on demand.

use crate::error::{FormatError, FormatResult};
use crate::fraction::{Fraction, MAX_DECIMAL_DIGITS};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// How a number was entered (and how it should be printed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberKind {
    #[default]
    Whole,
    Decimal,
    Improper,
    Mixed,
}

impl NumberKind {
    /// Whether numbers of this kind are written with a numerator and denominator
    pub fn is_fractional(&self) -> bool {
        matches!(self, NumberKind::Improper | NumberKind::Mixed)
    }
}

/// A number as typed: whole, decimal, improper fraction or mixed number
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RationalComponent {
    pub whole: String,
    pub decimal: String,
    pub numerator: String,
    pub denominator: String,
    pub negative: bool,
    pub kind: NumberKind,
}

fn patterns() -> &'static [(NumberKind, Regex)] {
    static PATTERNS: OnceLock<Vec<(NumberKind, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                NumberKind::Mixed,
                r"^\s*(-?)\s*([0-9]+)\s+([0-9]+)\s*/\s*([0-9]+)\s*$",
            ),
            (NumberKind::Improper, r"^\s*(-?)\s*([0-9]+)\s*/\s*([0-9]+)\s*$"),
            (NumberKind::Decimal, r"^\s*(-?)\s*([0-9]*)\.([0-9]*)\s*$"),
            (NumberKind::Whole, r"^\s*(-?)\s*([0-9]+)\s*$"),
        ]
        .into_iter()
        .filter_map(|(kind, pattern)| Regex::new(pattern).ok().map(|re| (kind, re)))
        .collect()
    })
}

/// Read one digit field, allowing a leading minus folded in by
/// [`RationalComponent::from_magnitude`]. Returns (negative, magnitude).
fn parse_field(field: &str) -> FormatResult<(bool, i128)> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok((false, 0));
    }
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::FractionParsing(field.to_string()));
    }
    // Only overflow is left to fail once the digits are checked
    let value = digits
        .parse::<i128>()
        .map_err(|_| FormatError::NumberTooLarge)?;
    Ok((negative, value))
}

fn magnitude(field: &str) -> &str {
    let trimmed = field.trim();
    trimmed.strip_prefix('-').unwrap_or(trimmed)
}

impl RationalComponent {
    /// Classify raw text as mixed, improper, decimal or whole, in that order.
    ///
    /// Blank text yields the empty component.
    pub fn parse(raw: &str) -> FormatResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        for (kind, re) in patterns() {
            let Some(caps) = re.captures(raw) else {
                continue;
            };
            let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
            let negative = !group(1).is_empty();
            let component = match kind {
                NumberKind::Mixed => Self {
                    whole: group(2),
                    numerator: group(3),
                    denominator: group(4),
                    negative,
                    kind: NumberKind::Mixed,
                    ..Default::default()
                },
                NumberKind::Improper => Self {
                    numerator: group(2),
                    denominator: group(3),
                    negative,
                    kind: NumberKind::Improper,
                    ..Default::default()
                },
                NumberKind::Decimal => {
                    let (whole, decimal) = (group(2), group(3));
                    if whole.is_empty() && decimal.is_empty() {
                        continue;
                    }
                    Self {
                        whole,
                        decimal,
                        negative,
                        kind: NumberKind::Decimal,
                        ..Default::default()
                    }
                }
                NumberKind::Whole => Self {
                    whole: group(2),
                    negative,
                    kind: NumberKind::Whole,
                    ..Default::default()
                },
            };
            return Ok(component);
        }

        Err(FormatError::FractionParsing(raw.to_string()))
    }

    /// Build a component from sign-less magnitude fields and an explicit sign.
    ///
    /// The sign is written into the numerator when the value is fractional,
    /// otherwise into the whole part.
    pub fn from_magnitude(
        whole: impl Into<String>,
        decimal: impl Into<String>,
        numerator: impl Into<String>,
        denominator: impl Into<String>,
        negative: bool,
    ) -> Self {
        let mut component = Self {
            whole: whole.into(),
            decimal: decimal.into(),
            numerator: numerator.into(),
            denominator: denominator.into(),
            negative: false,
            kind: NumberKind::Whole,
        };
        component.kind = if !component.decimal.is_empty() {
            NumberKind::Decimal
        } else if !component.numerator.is_empty() && !component.whole.is_empty() {
            NumberKind::Mixed
        } else if !component.numerator.is_empty() {
            NumberKind::Improper
        } else {
            NumberKind::Whole
        };
        if negative {
            if component.kind.is_fractional() {
                component.numerator.insert(0, '-');
            } else {
                component.whole.insert(0, '-');
            }
        }
        component
    }

    /// A whole number component, used for defaults
    pub fn whole_number(value: i64) -> Self {
        Self::from_magnitude(value.unsigned_abs().to_string(), "", "", "", value < 0)
    }

    /// Render an exact value as a component of the requested kind.
    ///
    /// Terminating decimals are written out in full; repeating ones stop
    /// after [`MAX_DECIMAL_DIGITS`] places. Non-integral values asked for as
    /// [`NumberKind::Whole`] are written as mixed numbers. Integral values of
    /// a fractional kind are written whole.
    pub fn from_fraction(value: Fraction, kind: NumberKind) -> Self {
        let negative = value.is_negative();
        match kind {
            NumberKind::Whole | NumberKind::Mixed if value.is_integer() => {
                Self::from_magnitude(value.abs().to_string(), "", "", "", negative)
            }
            NumberKind::Whole | NumberKind::Mixed => {
                let (whole, num, den) = value.to_proper();
                let whole = if whole == 0 { String::new() } else { whole.to_string() };
                let mut component =
                    Self::from_magnitude(whole, "", num.to_string(), den.to_string(), negative);
                component.kind = kind;
                component
            }
            NumberKind::Improper if value.is_integer() => {
                let mut component =
                    Self::from_magnitude(value.abs().to_string(), "", "", "", negative);
                component.kind = NumberKind::Improper;
                component
            }
            NumberKind::Improper => {
                let abs = value.abs();
                Self::from_magnitude(
                    "",
                    "",
                    abs.numerator().to_string(),
                    abs.denominator().to_string(),
                    negative,
                )
            }
            NumberKind::Decimal => {
                let places = value.terminating_digits().unwrap_or(MAX_DECIMAL_DIGITS);
                let (whole, digits) = value.to_decimal_parts(places);
                let mut component = Self::from_magnitude(whole, digits, "", "", negative);
                component.kind = NumberKind::Decimal;
                component
            }
        }
    }

    /// True when no field holds any text
    pub fn is_empty(&self) -> bool {
        self.whole.trim().is_empty()
            && self.decimal.trim().is_empty()
            && self.numerator.trim().is_empty()
            && self.denominator.trim().is_empty()
    }

    /// True when the value carries a minus sign in the flag or a field
    pub fn is_negative(&self) -> bool {
        self.negative
            || [&self.whole, &self.decimal, &self.numerator, &self.denominator]
                .iter()
                .any(|f| f.trim().starts_with('-'))
    }

    fn has_fraction_form(&self) -> bool {
        !self.numerator.trim().is_empty() || !self.denominator.trim().is_empty()
    }

    /// True when the fraction form has a denominator of zero
    pub fn has_zero_denominator(&self) -> bool {
        let den = magnitude(&self.denominator);
        !den.is_empty() && den.bytes().all(|b| b == b'0')
    }

    /// Exact value of this component. Empty components are zero.
    pub fn to_fraction(&self) -> FormatResult<Fraction> {
        if !self.decimal.trim().is_empty() && self.has_fraction_form() {
            return Err(FormatError::FractionParsing(self.to_string()));
        }

        let (_, whole) = parse_field(&self.whole)?;
        let mut value = Fraction::from_integer(whole)?;

        let decimal = magnitude(&self.decimal);
        if !decimal.is_empty() {
            let (_, digits) = parse_field(decimal)?;
            let scale = u32::try_from(decimal.len())
                .ok()
                .and_then(|places| 10i128.checked_pow(places))
                .ok_or(FormatError::NumberTooLarge)?;
            value = (value + Fraction::new(digits, scale)?)?;
        }

        if self.has_fraction_form() {
            let (_, num) = parse_field(&self.numerator)?;
            let (_, den) = parse_field(&self.denominator)?;
            if magnitude(&self.numerator).is_empty() || magnitude(&self.denominator).is_empty() {
                return Err(FormatError::FractionParsing(self.to_string()));
            }
            value = (value + Fraction::new(num, den)?)?;
        }

        Ok(if self.is_negative() { -value } else { value })
    }

    /// Three-way comparison of exact values
    pub fn compare(&self, other: &Self) -> FormatResult<Ordering> {
        Ok(self.to_fraction()?.cmp(&other.to_fraction()?))
    }

    /// Canonical text of this value written as `kind`
    pub fn unparse(&self, kind: NumberKind) -> FormatResult<String> {
        Ok(Self::from_fraction(self.to_fraction()?, kind).to_string())
    }
}

impl fmt::Display for RationalComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if self.is_negative() {
            f.write_str("-")?;
        }
        let whole = magnitude(&self.whole);
        let decimal = magnitude(&self.decimal);
        let numerator = magnitude(&self.numerator);
        let denominator = magnitude(&self.denominator);

        if !decimal.is_empty() {
            return write!(f, "{whole}.{decimal}");
        }
        if numerator.is_empty() && denominator.is_empty() {
            return f.write_str(whole);
        }
        if !whole.is_empty() {
            write!(f, "{whole} ")?;
        }
        write!(f, "{numerator}/{denominator}")
    }
}
