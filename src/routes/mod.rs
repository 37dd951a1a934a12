pub mod dashboard;
pub mod stream;
pub mod tick;
