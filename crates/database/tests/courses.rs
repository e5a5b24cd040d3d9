mod common;

use common::{course, faculty, student, test_db};
use database::{
    entities::registration,
    error::ServiceError,
    services::{
        course::{CoursePatch, CourseService, CourseUpdate, NewCourse},
        registration::RegistrationService,
    },
};
use models::{access::AccessDenied, difficulty::Difficulty};
use sea_orm::{EntityTrait, PaginatorTrait};

fn intro_to_ai() -> NewCourse {
    NewCourse {
        name: "Intro to AI".to_owned(),
        description: Some("Basics".to_owned()),
        duration: 42,
        difficulty: Difficulty::Intermediate,
    }
}

#[tokio::test]
async fn test_create_derives_code() {
    let db = test_db().await;
    let owner = faculty(&db, "hopper").await;

    let view = CourseService::create(&db, &owner, intro_to_ai())
        .await
        .unwrap();

    assert_eq!(view.course.code, "COURSE-57E9D6E4");
    assert!(view.course.is_active);
    assert_eq!(view.course.instructor_id, owner.faculty_profile_id.unwrap());
    assert_eq!(view.instructor_name, "Grace Hopper");
}

#[tokio::test]
async fn test_missing_description_is_kept_null() {
    let db = test_db().await;
    let owner = faculty(&db, "hopper").await;

    let mut new = intro_to_ai();
    new.description = None;
    let view = CourseService::create(&db, &owner, new).await.unwrap();

    assert_eq!(view.course.code, "COURSE-55C77DAE");
    assert_eq!(view.course.description, None);
}

#[tokio::test]
async fn test_empty_listing_has_a_first_page() {
    let db = test_db().await;

    let page = CourseService::list_public(&db, 1, 30).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages(), 0);
}

#[tokio::test]
async fn test_code_is_stable_across_updates() {
    let db = test_db().await;
    let owner = faculty(&db, "hopper").await;
    let created = CourseService::create(&db, &owner, intro_to_ai())
        .await
        .unwrap();
    let code = created.course.code.clone();

    let patched = CourseService::patch(
        &db,
        &owner,
        &code,
        CoursePatch {
            description: Some("Search, logic and learning".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(patched.course.code, code);
    assert_eq!(
        patched.course.description.as_deref(),
        Some("Search, logic and learning")
    );
    assert_eq!(patched.course.name, "Intro to AI");

    let replaced = CourseService::replace(
        &db,
        &owner,
        &code,
        CourseUpdate {
            name: "Artificial Intelligence".to_owned(),
            description: None,
            duration: 60,
            difficulty: Difficulty::Advanced,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.course.code, code);
    assert_eq!(replaced.course.difficulty, Difficulty::Advanced);
    // Left out of the replacement, so unchanged
    assert_eq!(
        replaced.course.description.as_deref(),
        Some("Search, logic and learning")
    );
    assert!(!replaced.course.is_active);
}

#[tokio::test]
async fn test_same_name_and_description_conflicts() {
    let db = test_db().await;
    let first = faculty(&db, "first").await;
    let second = faculty(&db, "second").await;

    CourseService::create(&db, &first, intro_to_ai())
        .await
        .unwrap();
    let err = CourseService::create(&db, &second, intro_to_ai())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn test_students_cannot_manage_courses() {
    let db = test_db().await;
    let learner = student(&db, "learner").await;

    let err = CourseService::create(&db, &learner, intro_to_ai())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Forbidden(AccessDenied::NotFaculty)
    ));
}

#[tokio::test]
async fn test_invalid_course_fields() {
    let db = test_db().await;
    let owner = faculty(&db, "hopper").await;

    let mut blank = intro_to_ai();
    blank.name = "  ".to_owned();
    let err = CourseService::create(&db, &owner, blank).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");

    let mut no_duration = intro_to_ai();
    no_duration.duration = 0;
    let err = CourseService::create(&db, &owner, no_duration)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_courses_are_scoped_to_owner() {
    let db = test_db().await;
    let owner = faculty(&db, "owner").await;
    let other = faculty(&db, "other").await;
    let view = course(&db, &owner, "Compilers").await;

    let found = CourseService::get_owned(&db, &owner, &view.course.code)
        .await
        .unwrap();
    assert_eq!(found.course.id, view.course.id);

    let err = CourseService::get_owned(&db, &other, &view.course.code)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");

    let err = CourseService::delete(&db, &other, &view.course.code)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");

    let mine = CourseService::list_for_faculty(&db, &owner, 1, 30)
        .await
        .unwrap();
    assert_eq!(mine.total_items, 1);
    let theirs = CourseService::list_for_faculty(&db, &other, 1, 30)
        .await
        .unwrap();
    assert_eq!(theirs.total_items, 0);
}

#[tokio::test]
async fn test_public_listing_paginates() {
    let db = test_db().await;
    let owner = faculty(&db, "hopper").await;
    for name in ["Algebra", "Biology", "Chemistry"] {
        course(&db, &owner, name).await;
    }

    let first = CourseService::list_public(&db, 1, 2).await.unwrap();
    assert_eq!(first.total_items, 3);
    assert_eq!(first.total_pages(), 2);
    assert!(first.has_next());
    let names: Vec<_> = first.items.iter().map(|v| v.course.name.as_str()).collect();
    assert_eq!(names, ["Algebra", "Biology"]);

    let second = CourseService::list_public(&db, 2, 2).await.unwrap();
    assert_eq!(second.items.len(), 1);
    assert!(!second.has_next());
    assert!(second.has_prev());

    let err = CourseService::list_public(&db, 0, 2).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");

    let err = CourseService::list_public(&db, 3, 2).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
    assert_eq!(err.to_string(), "Invalid page.");

    let err = CourseService::list_public(&db, 1, 0).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_delete_removes_registrations() {
    let db = test_db().await;
    let owner = faculty(&db, "hopper").await;
    let learner = student(&db, "learner").await;
    let view = course(&db, &owner, "Databases").await;

    RegistrationService::register(&db, &learner, &view.course.code)
        .await
        .unwrap();
    assert_eq!(registration::Entity::find().count(&db).await.unwrap(), 1);

    CourseService::delete(&db, &owner, &view.course.code)
        .await
        .unwrap();

    assert_eq!(registration::Entity::find().count(&db).await.unwrap(), 0);
    let err = CourseService::get_owned(&db, &owner, &view.course.code)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
}
