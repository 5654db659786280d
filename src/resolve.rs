use thiserror::Error;

use crate::date::{days_in_month, Date, InvalidDate, Weekday};
use crate::easter::next_easter_on_or_after;
use crate::rule::{HolidayRule, Periodicity, RuleKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("weekday {0} is out of range (0 = Sunday through 6 = Saturday)")]
    WeekdayOutOfRange(u8),

    #[error("week-of-month {0} is out of range (1 through 5, 5 meaning last)")]
    WeekOutOfRange(u8),

    #[error("rule references holiday {0:?}, which is not defined")]
    UnknownHoliday(String),

    #[error("holiday references form a cycle: {0}")]
    ReferenceCycle(String),

    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
}

/// State for one engine run: the start of the one-year reporting window and
/// the full rule set, which cross-reference rules look other holidays up in.
pub(crate) struct ResolutionContext<'a> {
    window_start: Date,
    rules: &'a [HolidayRule],
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(window_start: Date, rules: &'a [HolidayRule]) -> ResolutionContext<'a> {
        ResolutionContext {
            window_start,
            rules,
        }
    }

    /// Resolve one rule to its next occurrence on or after the window start.
    /// `Ok(None)` means the rule legitimately yields no date this cycle, as
    /// opposed to a hard failure.
    pub(crate) fn resolve(&self, rule: &'a HolidayRule) -> Result<Option<Date>, ResolveError> {
        self.resolve_inner(rule, &mut Vec::new())
    }

    fn resolve_inner(
        &self,
        rule: &'a HolidayRule,
        visiting: &mut Vec<&'a str>,
    ) -> Result<Option<Date>, ResolveError> {
        match &rule.kind {
            RuleKind::NthWeekdayOfMonth {
                month,
                week,
                weekday,
            } => self.nth_weekday_of_month(*month, *week, *weekday).map(Some),
            RuleKind::WeekdayOnOrAfter {
                weekday,
                month,
                day,
            } => self.weekday_on_or_after(*weekday, *month, *day).map(Some),
            RuleKind::NearestWeekdayOnOrAfter { month, day } => {
                self.nearest_weekday_on_or_after(*month, *day).map(Some)
            }
            RuleKind::LastFullWeekOfMonth { month, weekday } => {
                self.last_full_week_of_month(*month, *weekday).map(Some)
            }
            RuleKind::DaysAfterHoliday { holiday, days } => {
                self.days_after_holiday(rule, holiday, *days, visiting)
            }
            RuleKind::Easter => Ok(Some(next_easter_on_or_after(self.window_start))),
            RuleKind::Fixed {
                month,
                day,
                periodicity,
            } => self.fixed(*month, *day, *periodicity),
            RuleKind::Unrecognized => Ok(None),
        }
    }

    fn nth_weekday_of_month(
        &self,
        month: u8,
        week: u8,
        weekday: u8,
    ) -> Result<Date, ResolveError> {
        let weekday = weekday_from_rule(weekday)?;
        if !(1..=5).contains(&week) {
            return Err(ResolveError::WeekOutOfRange(week));
        }
        let mut base = self.window_start;
        loop {
            let date = nth_weekday_in_month(base, month, week, weekday)?;
            if date >= self.window_start {
                return Ok(date);
            }
            // The occurrence in the nearest matching month has already
            // passed; search again a year later.
            base = base.add_years(1);
        }
    }

    fn weekday_on_or_after(&self, weekday: u8, month: u8, day: u8) -> Result<Date, ResolveError> {
        let weekday = weekday_from_rule(weekday)?;
        let mut base = self.window_start;
        loop {
            let mut year = base.year();
            if month < base.month() {
                year += 1;
            }
            // The anchor is the first of the month plus day-1, so an anchor
            // day past the month's end runs over into the following month.
            let anchor = Date::from_ymd(year, month, 1)?.add_days(day as i64 - 1);
            let to_weekday =
                (weekday.index() as i64 - anchor.weekday().index() as i64).rem_euclid(7);
            let date = anchor.add_days(to_weekday);
            if date >= self.window_start {
                return Ok(date);
            }
            base = base.add_years(1);
        }
    }

    fn nearest_weekday_on_or_after(&self, month: u8, day: u8) -> Result<Date, ResolveError> {
        let mut date = self.month_day_on_or_after(month, day)?;
        while date.weekday().is_weekend() {
            date = date.add_days(1);
        }
        Ok(date)
    }

    fn last_full_week_of_month(&self, month: u8, weekday: u8) -> Result<Date, ResolveError> {
        let weekday = weekday_from_rule(weekday)?;
        let mut base = self.window_start;
        loop {
            let candidate = nth_weekday_in_month(base, month, 5, weekday)?;
            // The candidate's week only counts as full if its Saturday is
            // still inside the month; otherwise step back one week.
            let saturday = candidate.add_days(6 - weekday.index() as i64);
            let date = if saturday.month() == month {
                candidate
            } else {
                candidate.add_days(-7)
            };
            if date >= self.window_start {
                return Ok(date);
            }
            base = base.add_years(1);
        }
    }

    fn days_after_holiday(
        &self,
        rule: &'a HolidayRule,
        holiday: &'a str,
        days: i64,
        visiting: &mut Vec<&'a str>,
    ) -> Result<Option<Date>, ResolveError> {
        visiting.push(rule.name.as_str());
        if visiting.iter().any(|name| *name == holiday) {
            let mut chain = visiting.join(" -> ");
            chain.push_str(" -> ");
            chain.push_str(holiday);
            return Err(ResolveError::ReferenceCycle(chain));
        }
        let target = self
            .rules
            .iter()
            .find(|r| r.name == holiday)
            .ok_or_else(|| ResolveError::UnknownHoliday(holiday.to_string()))?;
        let resolved = self.resolve_inner(target, visiting)?;
        visiting.pop();
        // A referenced holiday that yields no date this cycle takes its
        // dependents with it.
        Ok(resolved.map(|date| date.add_days(days)))
    }

    fn fixed(
        &self,
        month: u8,
        day: u8,
        periodicity: Option<Periodicity>,
    ) -> Result<Option<Date>, ResolveError> {
        let date = self.month_day_on_or_after(month, day)?;
        match periodicity {
            Some(p) if !p.allows(date.year()) => Ok(None),
            _ => Ok(Some(date)),
        }
    }

    // The next date with the given month and day, on or after the window
    // start. February 29 exists only in leap years, which are never more than
    // eight years apart, so the date rolls forward to the next leap year. A
    // month/day pair that exists in no year at all is an error.
    fn month_day_on_or_after(&self, month: u8, day: u8) -> Result<Date, ResolveError> {
        let start_year = self.window_start.year();
        let mut invalid = None;
        for year in start_year..=start_year + 8 {
            match Date::from_ymd(year, month, day) {
                Ok(date) if date >= self.window_start => return Ok(date),
                // Already past in the window start's year; try the next one.
                Ok(_) => {}
                Err(err) => invalid = Some(err),
            }
        }
        let invalid =
            invalid.expect("a month/day that exists in some year occurs within eight years");
        Err(invalid.into())
    }
}

fn weekday_from_rule(weekday: u8) -> Result<Weekday, ResolveError> {
    Weekday::from_index(weekday).ok_or(ResolveError::WeekdayOutOfRange(weekday))
}

// The `week`th `weekday` of the nearest `month` at or after `base`'s month,
// with no regard for the window start (the callers roll the base forward when
// the result lands too early). Week 5 asks for a fifth occurrence and falls
// back one week when the month only has four of them, which makes it "the
// last occurrence".
fn nth_weekday_in_month(
    base: Date,
    month: u8,
    week: u8,
    weekday: Weekday,
) -> Result<Date, InvalidDate> {
    let mut year = base.year();
    if month < base.month() {
        year += 1;
    }
    let first = Date::from_ymd(year, month, 1)?;
    let to_weekday = (weekday.index() as i64 - first.weekday().index() as i64).rem_euclid(7);
    let mut day = 1 + to_weekday + (week as i64 - 1) * 7;
    if day > days_in_month(year, month) as i64 {
        day -= 7;
    }
    Ok(first.add_days(day - 1))
}
