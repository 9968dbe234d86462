pub mod clock;
pub mod records;
