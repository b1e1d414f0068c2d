pub mod booking;
pub mod court;
pub mod report;
pub mod review;
pub mod service;
pub mod venue;

pub use booking::{Booking, BookingStatus};
pub use court::Court;
pub use report::{Report, ReportStatus, ReportSubject};
pub use review::Review;
pub use service::AdditionalService;
pub use venue::{OperatingHours, Venue};
