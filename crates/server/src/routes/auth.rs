use crate::{
    auth::{extract::ApiJson, tokens::TokenType},
    dtos::user::{
        FacultyProfileResponse, FacultyRegisteredResponse, LoginRequest, LoginResponse,
        RefreshRequest, RefreshResponse, RegisterFacultyRequest, RegisterStudentRequest,
        StudentProfileResponse, StudentRegisteredResponse, UserSummary,
    },
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::account::{Account, AccountService};
use log::{info, warn};
use models::role::Role;

/// Create a student account and log it in
#[utoipa::path(
    post,
    path = "/student/register",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student account created", body = StudentRegisteredResponse),
        (status = 400, description = "Invalid account details"),
        (status = 409, description = "Username or email already in use")
    ),
    tag = "Authentication"
)]
pub async fn register_student(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterStudentRequest>,
) -> ApiResult<(StatusCode, Json<StudentRegisteredResponse>)> {
    let Account { user, profile } = AccountService::register_student(&state.db, req.into()).await?;
    let token = state.tokens.issue_pair(user.id)?;

    let response = StudentRegisteredResponse {
        message: "Student account created successfully".to_owned(),
        token,
        user: UserSummary::from(&user),
        data: StudentProfileResponse::new(&user, profile),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Create a faculty account and log it in
#[utoipa::path(
    post,
    path = "/faculty/register",
    request_body = RegisterFacultyRequest,
    responses(
        (status = 201, description = "Faculty account created", body = FacultyRegisteredResponse),
        (status = 400, description = "Invalid account details"),
        (status = 409, description = "Username or email already in use")
    ),
    tag = "Authentication"
)]
pub async fn register_faculty(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterFacultyRequest>,
) -> ApiResult<(StatusCode, Json<FacultyRegisteredResponse>)> {
    let Account { user, profile } = AccountService::register_faculty(&state.db, req.into()).await?;
    let token = state.tokens.issue_pair(user.id)?;

    let response = FacultyRegisteredResponse {
        message: "Faculty account created successfully".to_owned(),
        token,
        user: UserSummary::from(&user),
        data: FacultyProfileResponse::new(&user, profile),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate a student and return a token pair
#[utoipa::path(
    post,
    path = "/student/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "User is not a student"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
pub async fn student_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    login(&state, req, Role::Student).await.map(Json)
}

/// Authenticate a faculty member and return a token pair
#[utoipa::path(
    post,
    path = "/faculty/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "User is not a faculty"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
pub async fn faculty_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    login(&state, req, Role::Faculty).await.map(Json)
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/token/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "Refresh token invalid or expired")
    ),
    tag = "Authentication"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let user_id = state
        .tokens
        .verify(&req.refresh, TokenType::Refresh)
        .map_err(|e| {
            warn!("Rejected refresh token: {e}");
            ApiError::unauthorized("Token is invalid or expired")
        })?;

    // Deactivated users cannot keep refreshing
    let caller = AccountService::resolve_caller(&state.db, user_id).await?;
    let access = state.tokens.issue_access(caller.user_id)?;

    Ok(Json(RefreshResponse { access }))
}

async fn login(state: &AppState, req: LoginRequest, role: Role) -> ApiResult<LoginResponse> {
    let caller = AccountService::authenticate(&state.db, &req.username, &req.password, role).await?;
    let token = state.tokens.issue_pair(caller.user_id)?;
    info!("{role} '{}' logged in", caller.username);

    Ok(LoginResponse {
        token,
        user: UserSummary {
            id: caller.user_id,
            username: caller.username,
        },
    })
}
