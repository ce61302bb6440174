//! Frequency inference and calendar period boundaries.

use chrono::{Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Timelike, Weekday};
use perform_primitives::{Frequency, Timestamp};

use crate::SeriesError;

/// Minimum number of observations needed to infer a frequency.
const MIN_OBSERVATIONS: usize = 3;

/// Longest run of consecutive missing weekdays business-day sampling absorbs.
const MAX_HOLIDAY_RUN: u32 = 3;

/// Shortest gap, in seconds, between observations in consecutive periods of
/// each cadence. One-day steps map to business-day, the finer of the two
/// daily cadences.
const FLOOR_STEPS: [(Frequency, i64); 7] = [
    (Frequency::Minute, 60),
    (Frequency::Hourly, 3_600),
    (Frequency::BusinessDay, 86_400),
    (Frequency::Weekly, 7 * 86_400),
    (Frequency::Monthly, 28 * 86_400),
    (Frequency::Quarterly, 89 * 86_400),
    (Frequency::Annual, 365 * 86_400),
];

/// Inference order. Calendar-daily comes before business-day so that a run
/// of consecutive weekdays reads as daily.
const CANDIDATES: [Frequency; 8] = [
    Frequency::Minute,
    Frequency::Hourly,
    Frequency::Daily,
    Frequency::BusinessDay,
    Frequency::Weekly,
    Frequency::Monthly,
    Frequency::Quarterly,
    Frequency::Annual,
];

/// Infer the sampling frequency of an ascending index.
///
/// Candidates are tried finest first; the first one that explains every
/// gap wins. Business-day sampling tolerates weekends and holidays of up
/// to three consecutive weekdays. Weekly and coarser cadences require one observation in each
/// consecutive calendar period (weeks end on Sunday).
///
/// A series whose head follows one cadence and whose tail follows another
/// is rejected rather than resolved by majority.
///
/// # Errors
/// Returns `SeriesError::AmbiguousFrequency` if the index has fewer than
/// three observations or no single cadence fits every gap.
pub fn infer_freq(index: &[Timestamp]) -> Result<Frequency, SeriesError> {
    if index.len() < MIN_OBSERVATIONS {
        return Err(SeriesError::AmbiguousFrequency(format!(
            "need at least {MIN_OBSERVATIONS} observations, got {}",
            index.len()
        )));
    }

    let fits = |freq: Frequency| index.windows(2).all(|w| is_step(freq, w[0], w[1]));

    CANDIDATES.into_iter().find(|freq| fits(*freq)).ok_or_else(|| {
        let gaps: Vec<i64> = index.windows(2).map(|w| (w[1] - w[0]).num_seconds()).collect();
        let min = gaps.iter().min().copied().unwrap_or_default();
        let max = gaps.iter().max().copied().unwrap_or_default();
        SeriesError::AmbiguousFrequency(format!(
            "irregular sampling: gaps range from {:.2} to {:.2} days",
            min as f64 / 86_400.0,
            max as f64 / 86_400.0
        ))
    })
}

/// Finest cadence an index can be sampled at, judged by its smallest gap.
///
/// This is the coarsest frequency whose shortest step fits inside every
/// gap, so it never exceeds the true cadence of a series with missing
/// periods. Indexes with fewer than two observations give `Minute`.
#[must_use]
pub fn freq_floor(index: &[Timestamp]) -> Frequency {
    let Some(min_gap) = index.windows(2).map(|w| (w[1] - w[0]).num_seconds()).min() else {
        return Frequency::Minute;
    };
    FLOOR_STEPS
        .iter()
        .take_while(|(_, step)| *step <= min_gap)
        .last()
        .map_or(Frequency::Minute, |(freq, _)| *freq)
}

/// Whether `b` is exactly one `freq` step after `a`.
fn is_step(freq: Frequency, a: Timestamp, b: Timestamp) -> bool {
    let gap = b - a;
    match freq {
        Frequency::Minute => gap == TimeDelta::minutes(1),
        Frequency::Hourly => gap == TimeDelta::hours(1),
        Frequency::Daily => gap == TimeDelta::days(1),
        Frequency::BusinessDay => {
            is_weekday(a.date())
                && is_weekday(b.date())
                && a.time() == b.time()
                && business_days_between(a.date(), b.date())
                    .is_some_and(|n| (1..=MAX_HOLIDAY_RUN + 1).contains(&n))
        }
        Frequency::Weekly => period_end(freq, b) - period_end(freq, a) == TimeDelta::weeks(1),
        Frequency::Monthly => month_ordinal(b.date()) - month_ordinal(a.date()) == 1,
        Frequency::Quarterly => month_ordinal(b.date()) / 3 - month_ordinal(a.date()) / 3 == 1,
        Frequency::Annual => b.year() - a.year() == 1,
    }
}

/// Label of the calendar period containing `ts`.
///
/// Intraday periods are labelled by their start (floor); daily and coarser
/// periods by their last calendar day at midnight. Weekend observations
/// belong to the following Monday's business day.
#[must_use]
pub fn period_end(freq: Frequency, ts: Timestamp) -> Timestamp {
    let date = ts.date();
    let label = match freq {
        Frequency::Minute => {
            return date.and_hms_opt(ts.hour(), ts.minute(), 0).unwrap_or(ts);
        }
        Frequency::Hourly => return date.and_hms_opt(ts.hour(), 0, 0).unwrap_or(ts),
        Frequency::BusinessDay => match date.weekday() {
            Weekday::Sat => date + TimeDelta::days(2),
            Weekday::Sun => date + TimeDelta::days(1),
            _ => date,
        },
        Frequency::Daily => date,
        Frequency::Weekly => {
            date + TimeDelta::days(6 - i64::from(date.weekday().num_days_from_monday()))
        }
        Frequency::Monthly => last_day_after(date, 1),
        Frequency::Quarterly => {
            let quarter_end_month = date.month().div_ceil(3) * 3;
            last_day_after(date, quarter_end_month - date.month() + 1)
        }
        Frequency::Annual => last_day_after(date, 13 - date.month()),
    };
    label.and_time(NaiveTime::MIN)
}

/// Last day of the month `months - 1` months after `date`'s month.
fn last_day_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(months)))
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(date)
}

fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays in `(a, b]`, or `None` when `b` is more than a week away.
fn business_days_between(a: NaiveDate, b: NaiveDate) -> Option<u32> {
    let days = (b - a).num_days();
    if !(1..=7).contains(&days) {
        return None;
    }
    let count = a.iter_days().skip(1).take(days as usize).filter(|d| is_weekday(*d)).count();
    Some(count as u32)
}
