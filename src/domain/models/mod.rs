pub mod booking;
pub mod enquiry;
pub mod package;
pub mod schedule;
