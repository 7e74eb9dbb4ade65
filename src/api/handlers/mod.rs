pub mod availability;
pub mod booking;
pub mod enquiry;
pub mod health;
pub mod package;
pub mod schedule;
