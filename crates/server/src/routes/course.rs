use crate::{
    auth::extract::{ApiJson, ApiPath, ApiQuery, CurrentCaller},
    dtos::course::{
        CourseResponse, CreateCourseRequest, MessageResponse, PageQuery, PaginatedCoursesResponse,
        PatchCourseRequest, UpdateCourseRequest,
    },
    error::ApiResult,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::course::CourseService;

/// List the calling faculty member's courses
#[utoipa::path(
    get,
    path = "/courses",
    params(PageQuery),
    responses(
        (status = 200, description = "Courses owned by the caller", body = PaginatedCoursesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Caller is not a faculty member"),
        (status = 404, description = "Invalid page")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiQuery(params): ApiQuery<PageQuery>,
) -> ApiResult<Json<PaginatedCoursesResponse>> {
    let page =
        CourseService::list_for_faculty(&state.db, &caller, params.page, params.per_page).await?;

    Ok(Json(page.into()))
}

/// Create a course owned by the calling faculty member
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid course fields"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Caller is not a faculty member"),
        (status = 409, description = "A course with the same code already exists")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiJson(req): ApiJson<CreateCourseRequest>,
) -> ApiResult<(StatusCode, Json<CourseResponse>)> {
    let view = CourseService::create(&state.db, &caller, req.into()).await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Get one of the caller's courses by code
#[utoipa::path(
    get,
    path = "/courses/{code}",
    params(
        ("code" = String, Path, description = "Course code", example = "COURSE-57E9D6E4")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 403, description = "Caller is not a faculty member"),
        (status = 404, description = "No such course among the caller's courses")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(code): ApiPath<String>,
) -> ApiResult<Json<CourseResponse>> {
    let view = CourseService::get_owned(&state.db, &caller, &code).await?;

    Ok(Json(view.into()))
}

/// Replace the editable fields of a course. The code stays the same.
#[utoipa::path(
    put,
    path = "/courses/{code}",
    params(
        ("code" = String, Path, description = "Course code")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid course fields"),
        (status = 404, description = "No such course among the caller's courses")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn replace_course(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(code): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateCourseRequest>,
) -> ApiResult<Json<CourseResponse>> {
    let view = CourseService::replace(&state.db, &caller, &code, req.into()).await?;

    Ok(Json(view.into()))
}

/// Update some fields of a course. The code stays the same.
#[utoipa::path(
    patch,
    path = "/courses/{code}",
    params(
        ("code" = String, Path, description = "Course code")
    ),
    request_body = PatchCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid course fields"),
        (status = 404, description = "No such course among the caller's courses")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn patch_course(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(code): ApiPath<String>,
    ApiJson(req): ApiJson<PatchCourseRequest>,
) -> ApiResult<Json<CourseResponse>> {
    let view = CourseService::patch(&state.db, &caller, &code, req.into()).await?;

    Ok(Json(view.into()))
}

/// Delete a course together with its registrations
#[utoipa::path(
    delete,
    path = "/courses/{code}",
    params(
        ("code" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "No such course among the caller's courses")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(code): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    CourseService::delete(&state.db, &caller, &code).await?;

    Ok(Json(MessageResponse {
        message: "Course deleted successfully.".to_owned(),
    }))
}

/// Browse every course, no login required
#[utoipa::path(
    get,
    path = "/all",
    params(PageQuery),
    responses(
        (status = 200, description = "All courses", body = PaginatedCoursesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Invalid page")
    ),
    tag = "Courses"
)]
pub async fn all_courses(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageQuery>,
) -> ApiResult<Json<PaginatedCoursesResponse>> {
    let page = CourseService::list_public(&state.db, params.page, params.per_page).await?;

    Ok(Json(page.into()))
}
