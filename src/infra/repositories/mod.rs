pub mod postgres_booking_repo;
pub mod postgres_enquiry_repo;
pub mod postgres_package_repo;
pub mod postgres_schedule_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_enquiry_repo;
pub mod sqlite_package_repo;
pub mod sqlite_schedule_repo;
