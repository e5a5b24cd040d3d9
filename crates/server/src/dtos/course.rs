use chrono::{DateTime, Utc};
use database::services::{
    course::{CoursePatch, CourseUpdate, CourseView, NewCourse},
    page::{DEFAULT_PER_PAGE, Page},
};
use models::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub course_name: String,
    pub course_code: String,
    pub description: Option<String>,
    /// Length of the course in days
    pub duration: i32,
    /// 1 (beginner), 2 (intermediate) or 3 (advanced)
    #[schema(value_type = i16)]
    pub difficulty_level: Difficulty,
    pub is_active: bool,
    /// Faculty profile id of the instructor
    pub instructor: i32,
    pub instructor_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseView> for CourseResponse {
    fn from(view: CourseView) -> Self {
        let course = view.course;

        Self {
            id: course.id,
            course_name: course.name,
            course_code: course.code,
            description: course.description,
            duration: course.duration,
            difficulty_level: course.difficulty,
            is_active: course.is_active,
            instructor: course.instructor_id,
            instructor_name: view.instructor_name,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub course_name: String,
    /// Optional. A missing or null description is stored as null.
    pub description: Option<String>,
    pub duration: i32,
    #[schema(value_type = i16)]
    pub difficulty_level: Difficulty,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(req: CreateCourseRequest) -> Self {
        Self {
            name: req.course_name,
            description: req.description,
            duration: req.duration,
            difficulty: req.difficulty_level,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub course_name: String,
    /// Left out or null keeps the current description
    pub description: Option<String>,
    pub duration: i32,
    #[schema(value_type = i16)]
    pub difficulty_level: Difficulty,
    pub is_active: Option<bool>,
}

impl From<UpdateCourseRequest> for CourseUpdate {
    fn from(req: UpdateCourseRequest) -> Self {
        Self {
            name: req.course_name,
            description: req.description,
            duration: req.duration,
            difficulty: req.difficulty_level,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchCourseRequest {
    pub course_name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    #[schema(value_type = Option<i16>)]
    pub difficulty_level: Option<Difficulty>,
    pub is_active: Option<bool>,
}

impl From<PatchCourseRequest> for CoursePatch {
    fn from(req: PatchCourseRequest) -> Self {
        Self {
            name: req.course_name,
            description: req.description,
            duration: req.duration,
            difficulty: req.difficulty_level,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub results: Vec<CourseResponse>,
    pub pagination: PaginationMeta,
}

impl From<Page<CourseView>> for PaginatedCoursesResponse {
    fn from(page: Page<CourseView>) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(),
            total_items: page.total_items,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        };

        Self {
            results: page.items.into_iter().map(CourseResponse::from).collect(),
            pagination,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
