pub mod booking;
pub mod clubs;
pub mod health;
