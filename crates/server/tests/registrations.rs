mod common;

use axum::http::StatusCode;
use common::{create_course, faculty_token, get, patch, post, student_token, test_app};
use serde_json::{Value, json};

async fn enroll(app: &axum::Router, token: &str, code: &str) -> (StatusCode, Value) {
    post(app, &format!("/course/courses/{code}/register"), Some(token), json!({})).await
}

#[tokio::test]
async fn test_enrollment_and_approval_cap() {
    let app = test_app().await;
    let faculty = faculty_token(&app, "hopper").await;
    let learner = student_token(&app, "learner").await;

    let mut ids = Vec::new();
    for name in ["Algebra", "Biology", "Chemistry"] {
        let code = create_course(&app, &faculty, name).await;
        let (status, body) = enroll(&app, &learner, &code).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["course_code"], code.as_str());
        ids.push(body["id"].as_i64().unwrap());
    }

    for id in &ids[..2] {
        let (status, body) = patch(
            &app,
            &format!("/course/registrations/{id}"),
            &faculty,
            json!({ "status": "approved" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], "approved");
    }

    let (status, body) = patch(
        &app,
        &format!("/course/registrations/{}", ids[2]),
        &faculty,
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Students can only register for a maximum of 2 courses."
    );

    let (status, body) = get(&app, "/course/registrations", Some(&learner)).await;
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(statuses, ["approved", "approved", "pending"]);

    // Grading an approved registration at the cap is still allowed
    let (status, body) = patch(
        &app,
        &format!("/course/registrations/{}", ids[0]),
        &faculty,
        json!({ "grade": "A" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["grade"], "A");
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn test_enrollment_conflicts() {
    let app = test_app().await;
    let faculty = faculty_token(&app, "hopper").await;
    let learner = student_token(&app, "learner").await;
    let code = create_course(&app, &faculty, "Networks").await;

    let (status, _) = enroll(&app, &learner, &code).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = enroll(&app, &learner, &code).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "You are already registered for this course.");

    let archived = create_course(&app, &faculty, "Archived").await;
    let (status, _) = patch(
        &app,
        &format!("/course/courses/{archived}"),
        &faculty,
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = enroll(&app, &learner, &archived).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "This course is not active.");

    let (status, _) = enroll(&app, &learner, "COURSE-00000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = enroll(&app, &faculty, &code).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Only students can perform this action.");
}

#[tokio::test]
async fn test_course_roster_is_owner_only() {
    let app = test_app().await;
    let owner = faculty_token(&app, "owner").await;
    let other = faculty_token(&app, "other").await;
    let learner = student_token(&app, "learner").await;
    let code = create_course(&app, &owner, "Graphics").await;

    let (_, body) = enroll(&app, &learner, &code).await;
    let id = body["id"].as_i64().unwrap();

    let (status, body) = get(&app, &format!("/course/courses/{code}/registrations"), Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert!(body[0]["student_id"].as_str().unwrap().starts_with("STU"));

    let (status, _) = get(&app, &format!("/course/courses/{code}/registrations"), Some(&other)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = patch(
        &app,
        &format!("/course/registrations/{id}"),
        &other,
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = patch(
        &app,
        &format!("/course/registrations/{id}"),
        &owner,
        json!({ "status": "enrolled" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
