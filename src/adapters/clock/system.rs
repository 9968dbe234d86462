use chrono::{Local, NaiveDateTime};

use crate::ports::clock::ClockPort;

/// Wall clock of the host, in local time
///
/// Competition dates carry no timezone, so they are compared against the local time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
