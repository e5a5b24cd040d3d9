use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // At most one registration per (student, course)
        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_student_course")
                    .table(Registrations::Table)
                    .col(Registrations::StudentProfileId)
                    .col(Registrations::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Counting a student's approved registrations
        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_student_status")
                    .table(Registrations::Table)
                    .col(Registrations::StudentProfileId)
                    .col(Registrations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_course_id")
                    .table(Registrations::Table)
                    .col(Registrations::CourseId)
                    .to_owned(),
            )
            .await?;

        // Listing a faculty member's courses
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_instructor_id")
                    .table(Courses::Table)
                    .col(Courses::InstructorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_courses_instructor_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_registrations_course_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_registrations_student_status")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_registrations_student_course")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    InstructorId,
}

#[derive(Iden)]
enum Registrations {
    Table,
    StudentProfileId,
    CourseId,
    Status,
}
