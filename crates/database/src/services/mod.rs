pub mod account;
pub mod course;
pub mod page;
pub mod password;
pub mod registration;
