use crate::auth::tokens::TokenPair;
use database::{
    entities::{faculty_profile, student_profile, user},
    services::account::{NewFaculty, NewStudent},
};
use models::language::PreferredLanguage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterStudentRequest {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub biography: Option<String>,
    #[schema(value_type = Option<String>, example = "english")]
    pub preferred_language: Option<PreferredLanguage>,
}

impl From<RegisterStudentRequest> for NewStudent {
    fn from(req: RegisterStudentRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            biography: req.biography,
            preferred_language: req.preferred_language,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterFacultyRequest {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
}

impl From<RegisterFacultyRequest> for NewFaculty {
    fn from(req: RegisterFacultyRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            department: req.department,
            designation: req.designation,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
}

impl From<&user::Model> for UserSummary {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: TokenPair,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfileResponse {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_id: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub biography: Option<String>,
    #[schema(value_type = String, example = "english")]
    pub preferred_language: PreferredLanguage,
}

impl StudentProfileResponse {
    pub fn new(user: &user::Model, profile: student_profile::Model) -> Self {
        Self {
            username: user.username.clone(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            student_id: profile.student_id,
            email: profile.email,
            phone_number: profile.phone_number,
            biography: profile.biography,
            preferred_language: profile.preferred_language,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyProfileResponse {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub faculty_id: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
}

impl FacultyProfileResponse {
    pub fn new(user: &user::Model, profile: faculty_profile::Model) -> Self {
        Self {
            username: user.username.clone(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            faculty_id: profile.faculty_id,
            email: profile.email,
            department: profile.department,
            designation: profile.designation,
        }
    }
}

/// Returned when a student account is created. The tokens log the new user in.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRegisteredResponse {
    pub message: String,
    pub token: TokenPair,
    pub user: UserSummary,
    pub data: StudentProfileResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyRegisteredResponse {
    pub message: String,
    pub token: TokenPair,
    pub user: UserSummary,
    pub data: FacultyProfileResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}
