pub mod access;
pub mod course_code;
pub mod difficulty;
pub mod identifier;
pub mod language;
pub mod profile;
pub mod registration;
pub mod role;
