//! Day windows expressed relative to "today", and the concrete date ranges they resolve to.

use chrono::{Days, NaiveDate};

/// An inclusive range of concrete dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StartEndDate {
    /// Iterates every date from `start` through `end`, inclusive.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// A window of days defined by day offsets relative to "today" (both ends inclusive).
///
/// Offsets are resolved against the date passed to [`DayWindow::resolve`], never cached,
/// so the same window yields a different range once the calendar date advances.
///
/// # Examples
///
/// ```
/// use gardenbot::DayWindow;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let range = DayWindow::trailing(3).resolve(today).unwrap();
/// assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
/// assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayWindow {
    first: i64,
    last: i64,
}

impl DayWindow {
    /// The `days` days strictly before today.
    pub const fn trailing(days: u32) -> Self {
        Self {
            first: -(days as i64),
            last: -1,
        }
    }

    /// Today and the following `days - 1` days.
    pub const fn upcoming(days: u32) -> Self {
        Self {
            first: 0,
            last: days as i64 - 1,
        }
    }

    /// `radius` days either side of today, today included.
    pub const fn centered(radius: u32) -> Self {
        Self {
            first: -(radius as i64),
            last: radius as i64,
        }
    }

    /// Number of days covered. Zero for an empty window such as `upcoming(0)`.
    pub fn len(&self) -> usize {
        (self.last - self.first + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the offsets to concrete dates. `None` if the window is empty or falls
    /// outside the range chrono can represent.
    pub fn resolve(&self, today: NaiveDate) -> Option<StartEndDate> {
        if self.is_empty() {
            return None;
        }
        Some(StartEndDate {
            start: offset(today, self.first)?,
            end: offset(today, self.last)?,
        })
    }
}

fn offset(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days < 0 {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_add_days(Days::new(days as u64))
    }
}
