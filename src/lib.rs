//! Competition place booking for sports clubs.
//!
//! Clubs log in by email and spend their points to book places in upcoming competitions. The
//! booking rules live in [`commands`], behind the [`ports`] implemented by [`adapters`]. The
//! [`http`] module exposes everything over HTTP.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod http;
pub mod ports;
