pub mod course;
pub mod registration;
pub mod user;
