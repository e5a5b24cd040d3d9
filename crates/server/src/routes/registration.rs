use crate::{
    auth::extract::{ApiJson, ApiPath, CurrentCaller},
    dtos::registration::{RegistrationResponse, UpdateRegistrationRequest},
    error::ApiResult,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::registration::{RegistrationService, RegistrationView};

fn responses(views: Vec<RegistrationView>) -> Vec<RegistrationResponse> {
    views.into_iter().map(RegistrationResponse::from).collect()
}

/// Enroll the calling student in a course. The registration starts out pending.
#[utoipa::path(
    post,
    path = "/courses/{code}/register",
    params(
        ("code" = String, Path, description = "Course code", example = "COURSE-57E9D6E4")
    ),
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 400, description = "Student already holds the maximum of approved courses"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course inactive or already registered")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Registrations"
)]
pub async fn register_for_course(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(code): ApiPath<String>,
) -> ApiResult<(StatusCode, Json<RegistrationResponse>)> {
    let view = RegistrationService::register(&state.db, &caller, &code).await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// The calling student's registrations
#[utoipa::path(
    get,
    path = "/registrations",
    responses(
        (status = 200, description = "Registrations of the caller", body = [RegistrationResponse]),
        (status = 403, description = "Caller is not a student")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Registrations"
)]
pub async fn my_registrations(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<Vec<RegistrationResponse>>> {
    let views = RegistrationService::list_for_student(&state.db, &caller).await?;

    Ok(Json(responses(views)))
}

/// Registrations in one of the calling faculty member's courses
#[utoipa::path(
    get,
    path = "/courses/{code}/registrations",
    params(
        ("code" = String, Path, description = "Course code")
    ),
    responses(
        (status = 200, description = "Registrations in the course", body = [RegistrationResponse]),
        (status = 403, description = "Caller is not a faculty member"),
        (status = 404, description = "No such course among the caller's courses")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Registrations"
)]
pub async fn course_registrations(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(code): ApiPath<String>,
) -> ApiResult<Json<Vec<RegistrationResponse>>> {
    let views = RegistrationService::list_for_course(&state.db, &caller, &code).await?;

    Ok(Json(responses(views)))
}

/// Approve, reject or complete a registration, and/or set its grade
#[utoipa::path(
    patch,
    path = "/registrations/{id}",
    params(
        ("id" = i32, Path, description = "Registration id")
    ),
    request_body = UpdateRegistrationRequest,
    responses(
        (status = 200, description = "Registration updated", body = RegistrationResponse),
        (status = 400, description = "Invalid grade, or the student already holds the maximum of approved courses"),
        (status = 403, description = "Caller is not a faculty member"),
        (status = 404, description = "No such registration in the caller's courses")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Registrations"
)]
pub async fn update_registration(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateRegistrationRequest>,
) -> ApiResult<Json<RegistrationResponse>> {
    let view = RegistrationService::set_status(&state.db, &caller, id, req.into()).await?;

    Ok(Json(view.into()))
}
