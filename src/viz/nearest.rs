//! Nearest-sample lookup for the hover tooltip.
use super::scale::TimeScale;
use crate::models::Sample;

/// Leftmost index in `lo..len` whose timestamp is not before `x0`.
fn bisect_left(samples: &[Sample], x0: f64, lo: usize) -> usize {
    let lo = lo.min(samples.len());
    lo + samples[lo..].partition_point(|s| s.epoch_millis() < x0)
}

/// Sample closest in time to the instant `x0` (epoch milliseconds).
///
/// The search starts at index 1, so the first sample is only ever the left
/// candidate. Between two samples the later one wins only when strictly
/// closer. When `x0` falls before the first sample or after the last, the
/// last sample is returned on both sides.
///
/// Returns `None` only for an empty series.
pub fn nearest_sample(samples: &[Sample], x0: f64) -> Option<&Sample> {
    let last = samples.last()?;
    let i = if x0 < samples[0].epoch_millis() {
        0
    } else {
        bisect_left(samples, x0, 1)
    };
    if i > 0 && i < samples.len() {
        let (prev, next) = (&samples[i - 1], &samples[i]);
        if x0 - prev.epoch_millis() > next.epoch_millis() - x0 {
            Some(next)
        } else {
            Some(prev)
        }
    } else {
        Some(last)
    }
}

/// Nearest sample to a pointer at plot-area x pixel `px`.
pub fn nearest_to_pointer<'a>(samples: &'a [Sample], x: &TimeScale, px: f64) -> Option<&'a Sample> {
    nearest_sample(samples, x.invert(px))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, day).unwrap()
    }

    fn series() -> Vec<Sample> {
        vec![
            Sample::new(d(1), 1.0),
            Sample::new(d(3), 3.0),
            Sample::new(d(9), 9.0),
        ]
    }

    fn at(day: u32, hours: f64) -> f64 {
        Sample::new(d(day), 0.0).epoch_millis() + hours * 3_600_000.0
    }

    #[test]
    fn picks_closer_neighbour() {
        let s = series();
        assert_eq!(nearest_sample(&s, at(1, 20.0)).unwrap().timestamp, d(1));
        assert_eq!(nearest_sample(&s, at(2, 20.0)).unwrap().timestamp, d(3));
        assert_eq!(nearest_sample(&s, at(7, 0.0)).unwrap().timestamp, d(9));
    }

    #[test]
    fn tie_goes_to_earlier() {
        let s = series();
        assert_eq!(nearest_sample(&s, at(2, 0.0)).unwrap().timestamp, d(1));
        assert_eq!(nearest_sample(&s, at(6, 0.0)).unwrap().timestamp, d(3));
    }

    #[test]
    fn exact_hits() {
        let s = series();
        assert_eq!(nearest_sample(&s, at(1, 0.0)).unwrap().timestamp, d(1));
        assert_eq!(nearest_sample(&s, at(3, 0.0)).unwrap().timestamp, d(3));
        assert_eq!(nearest_sample(&s, at(9, 0.0)).unwrap().timestamp, d(9));
    }

    #[test]
    fn outside_either_side_falls_back_to_last() {
        let s = series();
        assert_eq!(nearest_sample(&s, at(1, -1.0)).unwrap().timestamp, d(9));
        assert_eq!(nearest_sample(&s, at(20, 0.0)).unwrap().timestamp, d(9));
    }

    #[test]
    fn single_and_empty() {
        let one = vec![Sample::new(d(4), 4.0)];
        assert_eq!(nearest_sample(&one, at(1, 0.0)).unwrap().timestamp, d(4));
        assert_eq!(nearest_sample(&one, at(4, 0.0)).unwrap().timestamp, d(4));
        assert!(nearest_sample(&[], 0.0).is_none());
    }
}
