//! Input checks run before a number line is laid out

use super::{NumberLine, NumberLineMode};
use crate::error::NumberLineError;
use spatial_model::Fraction;

pub type ValidationResult = std::result::Result<(), NumberLineError>;

impl NumberLine {
    /// Run every check in order and stop at the first failure.
    ///
    /// A hushed run is used for background recomputation where incomplete
    /// input is expected, so its failures are only logged at debug level.
    pub fn run_validation(&self, hush: bool) -> ValidationResult {
        let result = match self.model.mode {
            NumberLineMode::AutomaticMath => self.validate_math(),
            NumberLineMode::UserDefined => self.validate_user_defined(),
        };
        if let Err(e) = &result {
            if hush {
                tracing::debug!("number line validation failed: {}", e);
            } else {
                tracing::warn!("number line validation failed: {}", e);
            }
        }
        result
    }

    /// Segment start and end are both filled or both empty
    pub fn both_or_none_segments(&self) -> bool {
        self.model.segment.start.is_empty() == self.model.segment.end.is_empty()
    }

    fn validate_math(&self) -> ValidationResult {
        let model = &self.model;

        if !model.interval.has_zero_denominator() {
            let interval = model.interval.to_fraction()?;
            if interval.is_zero() {
                return Err(NumberLineError::IntervalIsZero);
            }
            if interval.is_negative() {
                return Err(NumberLineError::IntervalIsNegative);
            }
        }

        let fields = [
            &model.interval,
            &model.line_start,
            &model.line_end,
            &model.segment.start,
            &model.segment.end,
        ];
        if fields.iter().any(|f| f.has_zero_denominator()) {
            return Err(NumberLineError::DenominatorIsZero);
        }

        if model.line_start.is_empty() {
            return Err(NumberLineError::EmptyField("line start"));
        }
        if model.line_end.is_empty() {
            return Err(NumberLineError::EmptyField("line end"));
        }

        if !self.both_or_none_segments() {
            return Err(NumberLineError::UnpairedSegment);
        }

        let interval = model.interval.to_fraction()?;
        let start = model.line_start.to_fraction()?;
        let end = model.line_end.to_fraction()?;
        if start > end {
            return Err(NumberLineError::OutOfOrder("line start is after line end"));
        }

        let segment = if model.segment.is_active() {
            let seg_start = model.segment.start.to_fraction()?;
            let seg_end = model.segment.end.to_fraction()?;
            if seg_start > seg_end {
                return Err(NumberLineError::OutOfOrder("segment start is after segment end"));
            }
            if seg_start < start || seg_end > end {
                return Err(NumberLineError::OutOfOrder("segment lies outside the line"));
            }
            Some((seg_start, seg_end))
        } else {
            None
        };

        if !is_aligned((end - start)?, interval)? {
            return Err(NumberLineError::IntervalMisalignment("line end"));
        }
        if let Some((seg_start, seg_end)) = segment {
            if !is_aligned((seg_start - start)?, interval)? {
                return Err(NumberLineError::IntervalMisalignment("segment start"));
            }
            if !is_aligned((seg_end - start)?, interval)? {
                return Err(NumberLineError::IntervalMisalignment("segment end"));
            }
        }

        Ok(())
    }

    fn validate_user_defined(&self) -> ValidationResult {
        let model = &self.model;
        if model.user_points.is_empty() {
            return Err(NumberLineError::EmptyField("points"));
        }
        if model.segment.start_interval > model.segment.end_interval {
            return Err(NumberLineError::OutOfOrder("segment start is after segment end"));
        }
        if model.segment.end_interval > model.user_points.len() {
            return Err(NumberLineError::OutOfOrder("segment lies outside the line"));
        }
        Ok(())
    }
}

/// Whether `distance` is a whole number of `interval`s, using exact arithmetic
fn is_aligned(distance: Fraction, interval: Fraction) -> Result<bool, NumberLineError> {
    Ok((distance / interval)?.is_integer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatial_model::FormatError;

    fn number_line(interval: &str, start: &str, end: &str) -> NumberLine {
        let mut nl = NumberLine::new();
        nl.set_interval(interval).unwrap();
        nl.set_line(start, end).unwrap();
        nl
    }

    #[test]
    fn test_valid_line() {
        assert_eq!(number_line("1", "1", "4").run_validation(false), Ok(()));
        assert_eq!(number_line("1/3", "-1", "2/3").run_validation(false), Ok(()));
        assert_eq!(number_line("0.25", "0", "1.5").run_validation(false), Ok(()));
    }

    #[test]
    fn test_interval_checks_in_order() {
        assert_eq!(
            number_line("0", "1", "4").run_validation(true),
            Err(NumberLineError::IntervalIsZero)
        );
        assert_eq!(
            number_line("-1", "1", "4").run_validation(true),
            Err(NumberLineError::IntervalIsNegative)
        );
        assert_eq!(
            number_line("1/0", "1", "4").run_validation(true),
            Err(NumberLineError::DenominatorIsZero)
        );
        assert_eq!(
            number_line("1", "1", "2/0").run_validation(true),
            Err(NumberLineError::DenominatorIsZero)
        );
    }

    #[test]
    fn test_empty_interval_counts_as_zero() {
        assert_eq!(
            number_line("", "1", "4").run_validation(true),
            Err(NumberLineError::IntervalIsZero)
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(
            number_line("1", "", "4").run_validation(true),
            Err(NumberLineError::EmptyField("line start"))
        );
        assert_eq!(
            number_line("1", "1", " ").run_validation(true),
            Err(NumberLineError::EmptyField("line end"))
        );
    }

    #[test]
    fn test_unpaired_segment() {
        let mut nl = number_line("1", "0", "5");
        nl.set_segment("2", "").unwrap();
        assert!(!nl.both_or_none_segments());
        assert_eq!(nl.run_validation(false), Err(NumberLineError::UnpairedSegment));
    }

    #[test]
    fn test_out_of_order() {
        assert!(matches!(
            number_line("1", "4", "1").run_validation(true),
            Err(NumberLineError::OutOfOrder(_))
        ));

        let mut nl = number_line("1", "0", "5");
        nl.set_segment("3", "2").unwrap();
        assert!(matches!(nl.run_validation(true), Err(NumberLineError::OutOfOrder(_))));

        nl.set_segment("3", "7").unwrap();
        assert!(matches!(nl.run_validation(true), Err(NumberLineError::OutOfOrder(_))));
    }

    #[test]
    fn test_misaligned_line() {
        assert_eq!(
            number_line("2", "0", "5").run_validation(false),
            Err(NumberLineError::IntervalMisalignment("line end"))
        );
    }

    #[test]
    fn test_misaligned_segment() {
        let mut nl = number_line("2", "0", "6");
        nl.set_segment("1", "4").unwrap();
        assert_eq!(
            nl.run_validation(true),
            Err(NumberLineError::IntervalMisalignment("segment start"))
        );
    }

    #[test]
    fn test_exact_alignment_with_awkward_denominators() {
        // 0.1 steps from 0 to 0.3 are exact here, unlike binary floating point
        assert_eq!(number_line("0.1", "0", "0.3").run_validation(false), Ok(()));
        assert_eq!(number_line("1/7", "-3/7", "1").run_validation(false), Ok(()));
    }

    #[test]
    fn test_large_values_validate_exactly() {
        let p = "999999999999999989";
        assert_eq!(
            number_line(&format!("1/{p}"), "0", &format!("3/{p}")).run_validation(false),
            Ok(())
        );
        assert_eq!(
            number_line("1", "999999999999999000", "999999999999999999").run_validation(false),
            Ok(())
        );
        assert_eq!(
            number_line("7", &format!("-{p}"), p).run_validation(false),
            Err(NumberLineError::IntervalMisalignment("line end"))
        );
    }

    #[test]
    fn test_values_past_exact_range_are_errors() {
        let nl = number_line(
            "999999999999999989/999999999999999979",
            "1/999999999999999967",
            "1/999999999999999877",
        );
        assert_eq!(
            nl.run_validation(false),
            Err(NumberLineError::Format(FormatError::NumberTooLarge))
        );
    }

    #[test]
    fn test_user_defined_requires_points() {
        let mut nl = NumberLine::new();
        nl.model.mode = NumberLineMode::UserDefined;
        assert_eq!(
            nl.run_validation(true),
            Err(NumberLineError::EmptyField("points"))
        );
        nl.model.user_points = vec!["a".into(), "b".into()];
        assert_eq!(nl.run_validation(true), Ok(()));
        nl.model.segment.start_interval = 1;
        nl.model.segment.end_interval = 3;
        assert!(matches!(nl.run_validation(true), Err(NumberLineError::OutOfOrder(_))));
    }
}
