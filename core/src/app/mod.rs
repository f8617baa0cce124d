//! Application layer: the dashboard controller and its background tasks

pub mod controller;
pub mod debounce;
pub mod poller;

pub use controller::{CvDownload, Dashboard, Page};
pub use debounce::Debouncer;
pub use poller::Poller;
