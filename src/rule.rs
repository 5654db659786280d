/// One configured holiday definition: a display name plus the recipe for
/// computing the date of its next occurrence.
///
/// Names double as cross-reference keys for [`RuleKind::DaysAfterHoliday`].
/// They are not required to be unique; a reference resolves to the first
/// rule carrying the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRule {
    pub name: String,
    pub kind: RuleKind,
}

impl HolidayRule {
    pub fn new(name: impl Into<String>, kind: RuleKind) -> HolidayRule {
        HolidayRule {
            name: name.into(),
            kind,
        }
    }
}

/// The recipe for one holiday. Months are 1 through 12, weekdays are
/// 0 = Sunday through 6 = Saturday, matching the source rule records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// The `week`th occurrence of `weekday` in `month`, where week 5 means
    /// the last occurrence whether or not the month has five of them.
    NthWeekdayOfMonth { month: u8, week: u8, weekday: u8 },

    /// The first `weekday` falling on or after the anchor `month`/`day`.
    WeekdayOnOrAfter { weekday: u8, month: u8, day: u8 },

    /// The anchor `month`/`day` itself, pushed forward past Saturday and
    /// Sunday to the next business day.
    NearestWeekdayOnOrAfter { month: u8, day: u8 },

    /// The `weekday` of the last week that lies entirely within `month`.
    LastFullWeekOfMonth { month: u8, weekday: u8 },

    /// A fixed offset in days from another named holiday. The offset may be
    /// negative (Good Friday is Easter minus two days).
    DaysAfterHoliday { holiday: String, days: i64 },

    /// Western Easter Sunday.
    Easter,

    /// A fixed `month`/`day`, optionally recurring only every N years.
    Fixed {
        month: u8,
        day: u8,
        periodicity: Option<Periodicity>,
    },

    /// A rule whose source record matched no recognized shape. Resolves to
    /// no date; the engine reports it at warning level so misconfigured
    /// records don't vanish silently.
    Unrecognized,
}

/// Restricts a fixed-date rule to years at a fixed interval from a starting
/// year, like a quadrennial inauguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodicity {
    pub every_years: i32,
    pub start_year: i32,
}

impl Periodicity {
    /// Whether the holiday occurs in `year`. Intervals that are zero or
    /// negative never match; the original data format gives them no meaning.
    pub fn allows(&self, year: i32) -> bool {
        self.every_years > 0 && (year - self.start_year) % self.every_years == 0
    }
}
