pub mod course;
pub mod faculty_profile;
pub mod registration;
pub mod student_profile;
pub mod user;
