pub mod auth;
pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{
    doc::ApiDoc,
    routes::{auth as user, course, health, registration, root},
    state::AppState,
};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router, including the Swagger UI
pub fn app(state: AppState) -> Router {
    let users = OpenApiRouter::new()
        .routes(routes!(user::register_student))
        .routes(routes!(user::register_faculty))
        .routes(routes!(user::student_login))
        .routes(routes!(user::faculty_login))
        .routes(routes!(user::refresh_token));

    let courses = OpenApiRouter::new()
        .routes(routes!(course::list_courses, course::create_course))
        .routes(routes!(
            course::get_course,
            course::replace_course,
            course::patch_course,
            course::delete_course
        ))
        .routes(routes!(course::all_courses))
        .routes(routes!(registration::register_for_course))
        .routes(routes!(registration::course_registrations))
        .routes(routes!(registration::my_registrations))
        .routes(routes!(registration::update_registration));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .nest("/user", users)
        .nest("/course", courses)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
