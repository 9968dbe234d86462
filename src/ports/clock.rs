use chrono::NaiveDateTime;

/// Source of the current local date and time
#[mockall::automock]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
