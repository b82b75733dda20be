pub mod analytics;
pub mod error;
pub mod field;
pub mod history;
pub mod sensor;
pub mod timestamp;
