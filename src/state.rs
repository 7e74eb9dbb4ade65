use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    BookingRepository, EnquiryRepository, PackageRepository, ScheduleRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub package_repo: Arc<dyn PackageRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub enquiry_repo: Arc<dyn EnquiryRepository>,
}
