use chrono::{DateTime, Utc};
use database::services::registration::{RegistrationChange, RegistrationView};
use models::registration::RegistrationStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: i32,
    /// Student profile id
    pub student: i32,
    pub student_id: String,
    /// Course id
    pub course: i32,
    pub course_code: String,
    pub course_name: String,
    #[schema(value_type = String, example = "pending")]
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    pub grade: Option<String>,
}

impl From<RegistrationView> for RegistrationResponse {
    fn from(view: RegistrationView) -> Self {
        let registration = view.registration;

        Self {
            id: registration.id,
            student: registration.student_profile_id,
            student_id: view.student_id,
            course: registration.course_id,
            course_code: view.course_code,
            course_name: view.course_name,
            status: registration.status,
            registration_date: registration.registration_date,
            grade: registration.grade,
        }
    }
}

/// Either field may be left out. An empty grade clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRegistrationRequest {
    #[schema(value_type = Option<String>, example = "approved")]
    pub status: Option<RegistrationStatus>,
    pub grade: Option<String>,
}

impl From<UpdateRegistrationRequest> for RegistrationChange {
    fn from(req: UpdateRegistrationRequest) -> Self {
        Self {
            status: req.status,
            grade: req.grade,
        }
    }
}
