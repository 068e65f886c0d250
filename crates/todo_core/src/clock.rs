use crate::error::AppError;
use std::cell::Cell;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12]:[minute] [period case:lower]");

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in the local offset, UTC when the offset cannot be determined.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(local_offset())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<OffsetDateTime>,
}

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

/// Human readable date and time captured at creation or completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub date: String,
    pub time: String,
}

pub fn stamp(at: OffsetDateTime) -> Result<Stamp, AppError> {
    let date = at
        .format(DATE_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    let time = at
        .format(TIME_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    Ok(Stamp { date, time })
}

pub fn unix_millis(at: OffsetDateTime) -> u64 {
    u64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(0)
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
