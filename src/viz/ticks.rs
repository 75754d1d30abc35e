//! Tick placement and tick labels.
//!
//! Numeric ticks land on 1/2/5 × 10^k steps; time ticks land on calendar
//! boundaries (days, Sunday weeks, months, quarters, years). Tick counts are
//! hints, the actual number of ticks depends on where the nice boundaries
//! fall.
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use num_format::{Locale, ToFormattedString};

use crate::models::date_to_millis;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// (first index, last index, increment); a negative increment means "divide
/// by -inc", which keeps small decimal steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let scale = 10f64.powf(power) * factor;
        i1 = (start / scale).round();
        i2 = (stop / scale).round();
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        inc = scale;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nicely rounded ticks covering `[start, stop]` (either orientation).
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let at = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    let mut ticks: Vec<f64> = (0..n).map(|i| at(i1 + i as f64)).collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Distance between two adjacent ticks for the same arguments.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || start == stop {
        return 0.0;
    }
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Formats value ticks with grouping and just enough decimals for the step.
#[derive(Debug, Clone, Copy)]
pub struct NumberFormat {
    decimals: usize,
    locale: &'static Locale,
    decimal_sep: char,
}

impl NumberFormat {
    pub fn for_step(step: f64, locale_tag: &str) -> Self {
        let decimals = if step > 0.0 && step.is_finite() {
            (-(step.log10() + 0.01).floor()).max(0.0) as usize
        } else {
            0
        };
        let (locale, decimal_sep) = map_locale(locale_tag);
        Self {
            decimals,
            locale,
            decimal_sep,
        }
    }

    pub fn format(&self, v: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, v.abs());
        let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let negative = v < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        match int_part.parse::<u64>() {
            Ok(n) => out.push_str(&n.to_formatted_string(self.locale)),
            Err(_) => out.push_str(int_part),
        }
        if !frac.is_empty() {
            out.push(self.decimal_sep);
            out.push_str(frac);
        }
        out
    }
}

/// Calendar interval a time tick snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Day,
    Week,
    Month,
    Year,
}

impl TimeInterval {
    /// Smallest boundary at or after `date`.
    fn ceil(self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeInterval::Day => date,
            TimeInterval::Week => {
                let back = date.weekday().num_days_from_sunday() as i64;
                if back == 0 {
                    date
                } else {
                    date + Duration::days(7 - back)
                }
            }
            TimeInterval::Month => {
                if date.day() == 1 {
                    date
                } else {
                    add_months(first_of_month(date), 1)
                }
            }
            TimeInterval::Year => {
                if date.ordinal() == 1 {
                    date
                } else {
                    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap_or(date)
                }
            }
        }
    }

    fn next(self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeInterval::Day => date + Duration::days(1),
            TimeInterval::Week => date + Duration::weeks(1),
            TimeInterval::Month => add_months(date, 1),
            TimeInterval::Year => add_months(date, 12),
        }
    }

    /// Field a stepped interval filters on (`n % step == 0`).
    fn number(self, date: NaiveDate) -> i64 {
        match self {
            TimeInterval::Day => date.day0() as i64,
            TimeInterval::Week => 0,
            TimeInterval::Month => date.month0() as i64,
            TimeInterval::Year => date.year() as i64,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let total = date.year() as i64 * 12 + date.month0() as i64 + months;
    NaiveDate::from_ymd_opt(total.div_euclid(12) as i32, total.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(date)
}

const DAY_MS: f64 = 86_400_000.0;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Candidate (interval, step, approximate duration) triples, shortest first.
const TIME_STEPS: [(TimeInterval, i64, f64); 6] = [
    (TimeInterval::Day, 1, DAY_MS),
    (TimeInterval::Day, 2, 2.0 * DAY_MS),
    (TimeInterval::Week, 1, 7.0 * DAY_MS),
    (TimeInterval::Month, 1, 30.0 * DAY_MS),
    (TimeInterval::Month, 3, 90.0 * DAY_MS),
    (TimeInterval::Year, 1, YEAR_MS),
];

/// Pick the interval whose duration is closest (by ratio) to `span / count`.
pub fn choose_time_interval(start: NaiveDate, end: NaiveDate, count: usize) -> (TimeInterval, i64) {
    let (t0, t1) = (date_to_millis(start), date_to_millis(end));
    let target = (t1 - t0).abs() / count.max(1) as f64;

    let i = TIME_STEPS.partition_point(|(_, _, ms)| *ms <= target);
    if i == TIME_STEPS.len() {
        let step = tick_step(t0 / YEAR_MS, t1 / YEAR_MS, count).round().max(1.0);
        return (TimeInterval::Year, step as i64);
    }
    if i == 0 {
        return (TimeInterval::Day, 1);
    }
    let (lo, hi) = (TIME_STEPS[i - 1], TIME_STEPS[i]);
    let pick = if target / lo.2 < hi.2 / target { lo } else { hi };
    (pick.0, pick.1)
}

/// Calendar-aligned ticks inside `[start, end]`.
pub fn time_ticks(start: NaiveDate, end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    if count == 0 {
        return vec![];
    }
    let (lo, hi) = if end < start { (end, start) } else { (start, end) };
    let (interval, step) = choose_time_interval(lo, hi, count);

    let mut ticks = Vec::new();
    let mut t = interval.ceil(lo);
    while t <= hi {
        if step <= 1 || interval.number(t) % step == 0 {
            ticks.push(t);
        }
        let next = interval.next(t);
        if next <= t {
            break;
        }
        t = next;
    }
    if end < start {
        ticks.reverse();
    }
    ticks
}

/// Label for a time tick, coarsest calendar unit first: `2021`, `March`,
/// `Mar 07` (a Sunday), `Tue 09`.
pub fn format_time_tick(date: NaiveDate) -> String {
    let fmt = if date.day() != 1 {
        if date.weekday() != Weekday::Sun {
            "%a %d"
        } else {
            "%b %d"
        }
    } else if date.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    date.format(fmt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn linear_ticks_use_nice_steps() {
        assert_eq!(
            linear_ticks(0.0, 21.0, 8),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
        );
        assert_eq!(
            linear_ticks(0.0, 1.0, 10),
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        );
        assert_eq!(linear_ticks(0.0, 1000.0, 5), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);
    }

    #[test]
    fn linear_ticks_edge_cases() {
        assert_eq!(linear_ticks(1.0, 1.0, 8), vec![1.0]);
        assert!(linear_ticks(0.0, 10.0, 0).is_empty());
        assert_eq!(linear_ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn number_format_groups_and_trims() {
        let f = NumberFormat::for_step(tick_step(0.0, 30_000.0, 8), "en");
        assert_eq!(f.format(25_000.0), "25,000");
        let f = NumberFormat::for_step(0.1, "en");
        assert_eq!(f.format(0.3), "0.3");
        assert_eq!(f.format(-1.3), "-1.3");
        let f = NumberFormat::for_step(1000.0, "de");
        assert_eq!(f.format(12_000.0), "12.000");
    }

    #[test]
    fn nine_days_tick_daily() {
        let ticks = time_ticks(d(2021, 1, 1), d(2021, 1, 10), 7);
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0], d(2021, 1, 1));
        assert_eq!(ticks[9], d(2021, 1, 10));
    }

    #[test]
    fn three_weeks_tick_every_other_day() {
        let (interval, step) = choose_time_interval(d(2021, 1, 1), d(2021, 1, 20), 7);
        assert_eq!((interval, step), (TimeInterval::Day, 2));
        let ticks = time_ticks(d(2021, 1, 2), d(2021, 1, 8), 3);
        assert_eq!(ticks, vec![d(2021, 1, 3), d(2021, 1, 5), d(2021, 1, 7)]);
    }

    #[test]
    fn a_year_ticks_quarterly() {
        let (interval, step) = choose_time_interval(d(2020, 1, 1), d(2020, 12, 31), 7);
        assert_eq!((interval, step), (TimeInterval::Month, 3));
        let ticks = time_ticks(d(2020, 1, 15), d(2021, 1, 20), 7);
        assert_eq!(
            ticks,
            vec![d(2020, 4, 1), d(2020, 7, 1), d(2020, 10, 1), d(2021, 1, 1)]
        );
    }

    #[test]
    fn decades_tick_in_years() {
        let ticks = time_ticks(d(2000, 1, 1), d(2020, 1, 1), 7);
        assert!(ticks.iter().all(|t| t.month() == 1 && t.day() == 1));
        assert!(ticks.len() >= 4 && ticks.len() <= 11);
    }

    #[test]
    fn weekly_ticks_fall_on_sundays() {
        let ticks = time_ticks(d(2021, 3, 1), d(2021, 4, 30), 7);
        assert!(ticks.iter().all(|t| t.weekday() == Weekday::Sun));
    }

    #[test]
    fn single_date_has_one_tick() {
        assert_eq!(time_ticks(d(2021, 3, 5), d(2021, 3, 5), 7), vec![d(2021, 3, 5)]);
    }

    #[test]
    fn time_tick_labels() {
        assert_eq!(format_time_tick(d(2021, 1, 1)), "2021");
        assert_eq!(format_time_tick(d(2021, 3, 1)), "March");
        assert_eq!(format_time_tick(d(2021, 3, 7)), "Mar 07");
        assert_eq!(format_time_tick(d(2021, 3, 9)), "Tue 09");
    }
}
