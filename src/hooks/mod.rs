pub mod page_state;
pub mod poller;
pub mod use_analytics;
pub mod use_dashboard;
pub mod use_last_updated;
pub mod use_page;
