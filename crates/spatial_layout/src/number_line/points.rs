//! Point enumeration and segment interval derivation

use super::{NumberLine, NumberLineMode, SegmentPoint};
use crate::error::NumberLineError;
use spatial_model::RationalComponent;

/// Most points a single line will enumerate. Wider lines cannot fit any
/// page, and `format` reports them as too long before getting here.
pub const MAX_INTERVALS: usize = 1_000;

fn to_index(value: i128) -> Result<usize, NumberLineError> {
    usize::try_from(value).map_err(|_| NumberLineError::OutOfOrder("segment lies outside the line"))
}

impl NumberLine {
    /// Interval indices of the segment ends, counted from 1 at the line start.
    ///
    /// In user-defined mode the indices are typed directly and returned as-is.
    pub fn derive_segment_intervals(&mut self) -> Result<(usize, usize), NumberLineError> {
        let model = &mut self.model;
        if model.mode == NumberLineMode::UserDefined {
            return Ok((model.segment.start_interval, model.segment.end_interval));
        }

        let interval = model.interval.to_fraction()?;
        let line_start = model.line_start.to_fraction()?;
        let seg_start = model.segment.start.to_fraction()?;
        let seg_end = model.segment.end.to_fraction()?;

        let start_interval = ((seg_start - line_start)? / interval)?.floor() + 1;
        let length = ((seg_end - seg_start)? / interval)?.floor();
        let start_interval = to_index(start_interval)?;
        let end_interval = start_interval
            .checked_add(to_index(length)?)
            .ok_or(NumberLineError::OutOfOrder("segment lies outside the line"))?;

        model.segment.start_interval = start_interval;
        model.segment.end_interval = end_interval;
        tracing::trace!("segment spans intervals {}..={}", start_interval, end_interval);
        Ok((start_interval, end_interval))
    }

    /// Number of intervals on the line
    pub fn interval_count(&self) -> Result<usize, NumberLineError> {
        match self.model.mode {
            NumberLineMode::UserDefined => Ok(self.model.user_points.len()),
            NumberLineMode::AutomaticMath => {
                let interval = self.model.interval.to_fraction()?;
                let start = self.model.line_start.to_fraction()?;
                let end = self.model.line_end.to_fraction()?;
                to_index(((end - start)? / interval)?.floor() + 1)
            }
        }
    }

    /// Every point the line marks, in order.
    ///
    /// Runs a hushed validation first, since callers use this to refresh
    /// choices while the user is still typing.
    pub fn enumerate_points(&self) -> Result<Vec<SegmentPoint>, NumberLineError> {
        self.run_validation(true)?;

        if self.model.mode == NumberLineMode::UserDefined {
            return Ok(self
                .model
                .user_points
                .iter()
                .enumerate()
                .map(|(i, text)| SegmentPoint {
                    value: RationalComponent::parse(text).unwrap_or_default(),
                    interval: i + 1,
                    ..Default::default()
                })
                .collect());
        }

        let total = self.interval_count()?;
        if total > MAX_INTERVALS {
            return Err(NumberLineError::TooManyIntervals(total));
        }
        let interval = self.model.interval.to_fraction()?;
        let start = self.model.line_start.to_fraction()?;
        let kind = self.model.number_kind;

        let mut points = Vec::with_capacity(total);
        let mut value = start;
        for i in 0..total {
            if i > 0 {
                value = (value + interval)?;
            }
            points.push(SegmentPoint {
                value: RationalComponent::from_fraction(value, kind),
                interval: i + 1,
                ..Default::default()
            });
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SectionMode;
    use super::*;
    use proptest::prelude::*;
    use spatial_model::{Fraction, NumberKind};

    fn number_line(interval: &str, start: &str, end: &str) -> NumberLine {
        let mut nl = NumberLine::new();
        nl.set_interval(interval).unwrap();
        nl.set_line(start, end).unwrap();
        nl
    }

    #[test]
    fn test_whole_number_scenario() {
        let mut nl = number_line("1", "1", "4");
        nl.set_segment("1", "3").unwrap();
        nl.model.section = SectionMode::Segment;

        let points = nl.enumerate_points().unwrap();
        let values: Vec<String> = points.iter().map(|p| p.value.to_string()).collect();
        assert_eq!(values, ["1", "2", "3", "4"]);
        let indices: Vec<usize> = points.iter().map(|p| p.interval).collect();
        assert_eq!(indices, [1, 2, 3, 4]);

        assert_eq!(nl.derive_segment_intervals().unwrap(), (1, 3));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut nl = number_line("1/2", "-1", "2");
        nl.set_segment("0", "3/2").unwrap();
        let first = nl.derive_segment_intervals().unwrap();
        let second = nl.derive_segment_intervals().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, (3, 6));
    }

    #[test]
    fn test_fraction_points() {
        let nl = number_line("1/2", "0", "2");
        let values: Vec<String> = nl
            .enumerate_points()
            .unwrap()
            .iter()
            .map(|p| p.value.to_string())
            .collect();
        assert_eq!(values, ["0", "1/2", "1", "3/2", "2"]);
    }

    #[test]
    fn test_mixed_points() {
        let mut nl = number_line("1/2", "-1", "1");
        nl.model.number_kind = NumberKind::Mixed;
        let values: Vec<String> = nl
            .enumerate_points()
            .unwrap()
            .iter()
            .map(|p| p.value.to_string())
            .collect();
        assert_eq!(values, ["-1", "-1/2", "0", "1/2", "1"]);
    }

    #[test]
    fn test_decimal_points_are_exact() {
        let nl = number_line("0.1", "0.7", "1");
        let values: Vec<String> = nl
            .enumerate_points()
            .unwrap()
            .iter()
            .map(|p| p.value.to_string())
            .collect();
        assert_eq!(values, ["0.7", "0.8", "0.9", "1"]);
    }

    #[test]
    fn test_enumeration_requires_valid_line() {
        let nl = number_line("2", "0", "5");
        assert_eq!(
            nl.enumerate_points(),
            Err(NumberLineError::IntervalMisalignment("line end"))
        );
    }

    #[test]
    fn test_user_defined_points() {
        let mut nl = NumberLine::new();
        nl.model.mode = NumberLineMode::UserDefined;
        nl.model.user_points = vec!["a".into(), "3".into()];
        let points = nl.enumerate_points().unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].value.is_empty());
        assert_eq!(points[1].value.to_string(), "3");
        assert_eq!(nl.interval_count().unwrap(), 2);
    }

    #[test]
    fn test_point_count_is_bounded() {
        let nl = number_line("1", "0", "100000000");
        assert_eq!(nl.interval_count().unwrap(), 100_000_001);
        assert_eq!(
            nl.enumerate_points(),
            Err(NumberLineError::TooManyIntervals(100_000_001))
        );

        let nl = number_line("1", "1", &MAX_INTERVALS.to_string());
        assert_eq!(nl.enumerate_points().unwrap().len(), MAX_INTERVALS);
    }

    #[test]
    fn test_huge_values_do_not_panic() {
        let nl = number_line(
            "999999999999999989/999999999999999979",
            "1/999999999999999967",
            "1/999999999999999877",
        );
        assert!(nl.interval_count().is_err());
        assert!(nl.enumerate_points().is_err());
    }

    proptest! {
        #[test]
        fn prop_segment_derivation_idempotent(
            num in 1i128..6,
            den in 1i128..6,
            start in -20i128..20,
            steps in 1i128..16,
            a in 0i128..16,
            b in 0i128..16,
        ) {
            let (a, b) = (a.min(b).min(steps), a.max(b).min(steps));
            let interval = Fraction::new(num, den).unwrap();
            let at = |k: i128| {
                let offset = (Fraction::from_integer(k).unwrap() * interval).unwrap();
                let value = (Fraction::from_integer(start).unwrap() + offset).unwrap();
                RationalComponent::from_fraction(value, NumberKind::Improper).to_string()
            };

            let mut nl = number_line(&interval.to_string(), &at(0), &at(steps));
            nl.set_segment(&at(a), &at(b)).unwrap();
            nl.model.section = SectionMode::Segment;
            prop_assert_eq!(nl.run_validation(true), Ok(()));

            let first = nl.derive_segment_intervals().unwrap();
            let second = nl.derive_segment_intervals().unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(first, (a as usize + 1, b as usize + 1));
        }
    }
}
