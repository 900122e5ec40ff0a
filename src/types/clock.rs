//! Source of the "today" boundary that splits historical from forecast queries.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
///
/// Every query reads the clock again, so a long-running process moves its
/// historical/forecast boundary when the date rolls over.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the machine running the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A fixed date acts as a clock that never advances.
impl Clock for NaiveDate {
    fn today(&self) -> NaiveDate {
        *self
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
