//! Foundational types for the trade register.

pub mod bucket;
pub mod calendar;
pub mod client;
pub mod currency;
pub mod register;
pub mod transaction;
