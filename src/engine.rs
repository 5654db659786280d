use tracing::warn;

use crate::date::Date;
use crate::resolve::{ResolutionContext, ResolveError};
use crate::rule::{HolidayRule, RuleKind};

/// A holiday with its resolved occurrence date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHoliday {
    pub name: String,
    pub date: Date,
}

/// A rule that could not be resolved, kept alongside the successes so one
/// bad record doesn't cost the caller the rest of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub name: String,
    pub error: ResolveError,
}

/// The outcome of one engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingHolidays {
    /// Resolved holidays, ascending by date. Holidays sharing a date keep
    /// the order their rules appeared in.
    pub holidays: Vec<ResolvedHoliday>,
    /// Rules that failed to resolve, in rule order.
    pub failures: Vec<RuleFailure>,
}

/// Resolve every rule against the year-long window beginning at `start` and
/// return the occurrences in chronological order.
///
/// Rules that legitimately have no occurrence this cycle (periodicity misses,
/// unrecognized shapes) are simply absent from the output; rules that fail
/// outright are reported in [`UpcomingHolidays::failures`]. Names are not
/// deduplicated, so two rules with the same name can both appear.
pub fn upcoming_holidays(rules: &[HolidayRule], start: Date) -> UpcomingHolidays {
    let ctx = ResolutionContext::new(start, rules);
    let mut holidays = Vec::new();
    let mut failures = Vec::new();
    for rule in rules {
        match ctx.resolve(rule) {
            Ok(Some(date)) => holidays.push(ResolvedHoliday {
                name: rule.name.clone(),
                date,
            }),
            Ok(None) => {
                if matches!(rule.kind, RuleKind::Unrecognized) {
                    warn!(rule = %rule.name, "holiday rule matched no recognized shape, skipping");
                }
            }
            Err(error) => {
                warn!(rule = %rule.name, %error, "holiday rule failed to resolve");
                failures.push(RuleFailure {
                    name: rule.name.clone(),
                    error,
                });
            }
        }
    }
    // Stable sort, so equal dates keep their rule order.
    holidays.sort_by_key(|holiday| holiday.date);
    UpcomingHolidays {
        holidays,
        failures,
    }
}
