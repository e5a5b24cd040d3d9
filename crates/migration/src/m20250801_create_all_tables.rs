use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student_profiles table (one-to-one with users)
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::StudentId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::FirstName).string_len(63))
                    .col(ColumnDef::new(StudentProfiles::LastName).string_len(63))
                    .col(
                        ColumnDef::new(StudentProfiles::Email)
                            .string_len(254)
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::PhoneNumber).string_len(15))
                    .col(ColumnDef::new(StudentProfiles::Biography).text())
                    .col(
                        ColumnDef::new(StudentProfiles::PreferredLanguage)
                            .string_len(10)
                            .not_null()
                            .default("english"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_profiles-user_id")
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create faculty_profiles table (one-to-one with users)
        manager
            .create_table(
                Table::create()
                    .table(FacultyProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FacultyProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FacultyProfiles::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(FacultyProfiles::FacultyId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FacultyProfiles::FirstName).string_len(255))
                    .col(ColumnDef::new(FacultyProfiles::LastName).string_len(255))
                    .col(ColumnDef::new(FacultyProfiles::Department).string_len(255))
                    .col(ColumnDef::new(FacultyProfiles::Designation).string_len(255))
                    .col(
                        ColumnDef::new(FacultyProfiles::Email)
                            .string_len(254)
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-faculty_profiles-user_id")
                            .from(FacultyProfiles::Table, FacultyProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::Duration).integer().not_null())
                    .col(ColumnDef::new(Courses::Difficulty).small_integer().not_null())
                    .col(ColumnDef::new(Courses::InstructorId).integer().not_null())
                    .col(
                        ColumnDef::new(Courses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-instructor_id")
                            .from(Courses::Table, Courses::InstructorId)
                            .to(FacultyProfiles::Table, FacultyProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create registrations table (student <-> course)
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Registrations::StudentProfileId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Registrations::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Registrations::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Registrations::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Registrations::Grade).string_len(2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-registrations-student_profile_id")
                            .from(Registrations::Table, Registrations::StudentProfileId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-registrations-course_id")
                            .from(Registrations::Table, Registrations::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FacultyProfiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    IsActive,
    CreatedAt,
    ModifiedAt,
}

#[derive(Iden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
    StudentId,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Biography,
    PreferredLanguage,
}

#[derive(Iden)]
enum FacultyProfiles {
    Table,
    Id,
    UserId,
    FacultyId,
    FirstName,
    LastName,
    Department,
    Designation,
    Email,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Code,
    Description,
    Duration,
    Difficulty,
    InstructorId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Registrations {
    Table,
    Id,
    StudentProfileId,
    CourseId,
    Status,
    RegistrationDate,
    Grade,
}
