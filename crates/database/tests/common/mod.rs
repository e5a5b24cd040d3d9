#![allow(dead_code)]

use database::{
    db::create_connection,
    services::{
        account::{AccountService, NewFaculty, NewStudent},
        course::{CourseService, CourseView, NewCourse},
    },
};
use migration::{Migrator, MigratorTrait};
use models::{access::Caller, difficulty::Difficulty};
use sea_orm::DatabaseConnection;

/// A fresh, migrated in-memory database. One connection keeps it alive.
pub async fn test_db() -> DatabaseConnection {
    let db = create_connection("sqlite::memory:", 1)
        .await
        .expect("failed to open sqlite database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

pub async fn faculty(db: &DatabaseConnection, username: &str) -> Caller {
    let account = AccountService::register_faculty(
        db,
        NewFaculty {
            username: username.to_owned(),
            password: "hunter22".to_owned(),
            first_name: Some("Grace".to_owned()),
            last_name: Some("Hopper".to_owned()),
            ..Default::default()
        },
    )
    .await
    .expect("failed to register faculty");

    AccountService::resolve_caller(db, account.user.id)
        .await
        .expect("failed to resolve faculty caller")
}

pub async fn student(db: &DatabaseConnection, username: &str) -> Caller {
    let account = AccountService::register_student(
        db,
        NewStudent {
            username: username.to_owned(),
            password: "hunter22".to_owned(),
            ..Default::default()
        },
    )
    .await
    .expect("failed to register student");

    AccountService::resolve_caller(db, account.user.id)
        .await
        .expect("failed to resolve student caller")
}

pub async fn course(db: &DatabaseConnection, owner: &Caller, name: &str) -> CourseView {
    CourseService::create(
        db,
        owner,
        NewCourse {
            name: name.to_owned(),
            description: Some(format!("All about {name}")),
            duration: 30,
            difficulty: Difficulty::Beginner,
        },
    )
    .await
    .expect("failed to create course")
}
