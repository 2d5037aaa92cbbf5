// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar and time model for planning slots.
//!
//! Every shift period maps to a fixed local interval anchored on the
//! assignment date. Periods that run past midnight (night, 24h guard,
//! on-call) end on the following day, which is what the rest-gap and
//! overlap computations rely on.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time, Weekday};

/// A shift period within a planning day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftPeriod {
    /// 08:00 to 12:00.
    Morning,
    /// 13:00 to 17:00.
    Afternoon,
    /// 08:00 to 17:00.
    FullDay,
    /// 18:00 to midnight.
    Night,
    /// 08:00 to 08:00 the following day.
    #[serde(rename = "GUARD_24H")]
    Guard24h,
    /// 18:00 to 08:00 the following day.
    OnCall,
}

impl ShiftPeriod {
    /// All periods, ordered by start time.
    pub const ALL: [Self; 6] = [
        Self::Morning,
        Self::FullDay,
        Self::Guard24h,
        Self::Afternoon,
        Self::Night,
        Self::OnCall,
    ];

    /// Day-time periods a slot can be moved to.
    pub const DAYTIME: [Self; 3] = [Self::Morning, Self::Afternoon, Self::FullDay];

    /// Converts this period to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "MORNING",
            Self::Afternoon => "AFTERNOON",
            Self::FullDay => "FULL_DAY",
            Self::Night => "NIGHT",
            Self::Guard24h => "GUARD_24H",
            Self::OnCall => "ON_CALL",
        }
    }

    /// Local start time of the period.
    #[must_use]
    pub const fn start_time(&self) -> Time {
        match self {
            Self::Morning | Self::FullDay | Self::Guard24h => time!(08:00),
            Self::Afternoon => time!(13:00),
            Self::Night | Self::OnCall => time!(18:00),
        }
    }

    /// Length of the period in whole hours.
    #[must_use]
    pub const fn duration_hours(&self) -> u32 {
        match self {
            Self::Morning | Self::Afternoon => 4,
            Self::FullDay => 9,
            Self::Night => 6,
            Self::Guard24h => 24,
            Self::OnCall => 14,
        }
    }

    /// Whether the period ends on the day after its date.
    #[must_use]
    pub const fn bridges_midnight(&self) -> bool {
        matches!(self, Self::Night | Self::Guard24h | Self::OnCall)
    }

    /// Whether a minimum rest period must follow this period.
    #[must_use]
    pub const fn requires_rest(&self) -> bool {
        matches!(self, Self::Night | Self::Guard24h)
    }

    /// Night, guard and on-call duties, used for equity metrics.
    #[must_use]
    pub const fn is_heavy_duty(&self) -> bool {
        matches!(self, Self::Night | Self::Guard24h | Self::OnCall)
    }
}

impl FromStr for ShiftPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MORNING" => Ok(Self::Morning),
            "AFTERNOON" => Ok(Self::Afternoon),
            "FULL_DAY" => Ok(Self::FullDay),
            "NIGHT" => Ok(Self::Night),
            "GUARD_24H" => Ok(Self::Guard24h),
            "ON_CALL" => Ok(Self::OnCall),
            _ => Err(DomainError::InvalidShiftPeriod(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which ISO weeks an assignment applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekParity {
    /// Every week.
    #[default]
    All,
    /// Even ISO week numbers.
    Even,
    /// Odd ISO week numbers.
    Odd,
}

impl WeekParity {
    /// Returns whether a date falls in a week selected by this parity.
    #[must_use]
    pub fn matches(&self, date: Date) -> bool {
        match self {
            Self::All => true,
            Self::Even | Self::Odd => week_parity_of(date) == *self,
        }
    }
}

impl FromStr for WeekParity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "EVEN" => Ok(Self::Even),
            "ODD" => Ok(Self::Odd),
            _ => Err(DomainError::InvalidWeekParity(s.to_string())),
        }
    }
}

/// Returns the parity of the ISO week containing `date`.
///
/// Never returns [`WeekParity::All`].
#[must_use]
pub fn week_parity_of(date: Date) -> WeekParity {
    if date.iso_week() % 2 == 0 {
        WeekParity::Even
    } else {
        WeekParity::Odd
    }
}

/// A (date, period) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// The planning date the period is anchored on.
    pub date: Date,
    /// The shift period.
    pub period: ShiftPeriod,
}

impl Slot {
    /// Creates a new `Slot`.
    #[must_use]
    pub const fn new(date: Date, period: ShiftPeriod) -> Self {
        Self { date, period }
    }

    /// Concrete start of the slot.
    #[must_use]
    pub const fn start(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date, self.period.start_time())
    }

    /// Concrete end of the slot.
    ///
    /// Night periods end at next-day midnight, guards and on-call at
    /// next-day 08:00.
    #[must_use]
    pub fn end(&self) -> PrimitiveDateTime {
        self.start()
            .saturating_add(Duration::hours(i64::from(self.period.duration_hours())))
    }

    /// Whether this slot conflicts with another one.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(*self, *other)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date, self.period)
    }
}

/// Returns whether two slots conflict.
///
/// Slots conflict when their half-open intervals intersect, or when one of
/// them is a night or guard period and the other starts exactly when it
/// ends (adjacent across midnight).
#[must_use]
pub fn overlaps(a: Slot, b: Slot) -> bool {
    let (a_start, a_end) = (a.start(), a.end());
    let (b_start, b_end) = (b.start(), b.end());

    if a_start < b_end && b_start < a_end {
        return true;
    }

    let bridging = |slot: Slot| matches!(slot.period, ShiftPeriod::Night | ShiftPeriod::Guard24h);
    (bridging(a) && b_start == a_end) || (bridging(b) && a_start == b_end)
}

/// Hours between the end of `end` and the start of `start`.
///
/// Negative when the slots overlap.
#[must_use]
pub fn rest_gap_hours(end: Slot, start: Slot) -> f64 {
    let gap: Duration = start.start() - end.end();
    gap.as_seconds_f64() / 3600.0
}

/// Returns the earliest slot whose start is at least `minimum_rest_hours`
/// after `after`.
#[must_use]
pub fn next_permissible_slot(after: PrimitiveDateTime, minimum_rest_hours: f64) -> Slot {
    let threshold: PrimitiveDateTime = after.saturating_add(Duration::saturating_seconds_f64(
        minimum_rest_hours.max(0.0) * 3600.0,
    ));
    let threshold_date: Date = threshold.date();

    ShiftPeriod::ALL
        .iter()
        .map(|period| Slot::new(threshold_date, *period))
        .find(|slot| slot.start() >= threshold)
        .unwrap_or_else(|| {
            Slot::new(
                threshold_date.saturating_add(Duration::days(1)),
                ShiftPeriod::ALL[0],
            )
        })
}

/// ISO (year, week) key for a date.
#[must_use]
pub const fn iso_week_key(date: Date) -> (i32, u8) {
    let (year, week, _) = date.to_iso_week_date();
    (year, week)
}

/// Monday through Sunday of the ISO week containing `date`.
#[must_use]
pub fn iso_week_dates(date: Date) -> [Date; 7] {
    let monday: Date = date.saturating_sub(Duration::days(i64::from(
        date.weekday().number_days_from_monday(),
    )));
    let mut days: [Date; 7] = [monday; 7];
    for (offset, day) in (0_i64..).zip(days.iter_mut()) {
        *day = monday.saturating_add(Duration::days(offset));
    }
    days
}

/// First and last date of the calendar month containing `date`.
#[must_use]
pub fn month_bounds(date: Date) -> (Date, Date) {
    let first: Date = date.replace_day(1).unwrap_or(date);
    let mut last: Date = date;
    while let Some(next) = last.next_day().filter(|d| d.month() == date.month()) {
        last = next;
    }
    (first, last)
}

/// Counts Monday to Friday dates in `[start, end]` that are not holidays.
#[must_use]
pub fn working_days_between(start: Date, end: Date, holidays: &[Date]) -> u32 {
    let mut count: u32 = 0;
    let mut current: Date = start;
    while current <= end {
        let weekend: bool = matches!(current.weekday(), Weekday::Saturday | Weekday::Sunday);
        if !weekend && !holidays.contains(&current) {
            count += 1;
        }
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }
    count
}

/// Formats a date as `dd/mm`.
#[must_use]
pub fn format_day_month(date: Date) -> String {
    format!("{:02}/{:02}", date.day(), u8::from(date.month()))
}
