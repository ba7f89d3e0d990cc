pub mod dashboard;
pub mod devices;
