pub use date::{days_in_month, is_leap_year, Date, InvalidDate, Weekday};
pub use easter::{easter_sunday, next_easter_on_or_after};
pub use engine::{upcoming_holidays, ResolvedHoliday, RuleFailure, UpcomingHolidays};
pub use resolve::ResolveError;
pub use rule::{HolidayRule, Periodicity, RuleKind};

mod date;
mod div_rem;
mod easter;
mod engine;
mod gregorian_normalized_date;
mod resolve;
mod rule;
