pub mod api;
pub mod pages;
pub mod report;
pub mod timer;
pub mod transport;
