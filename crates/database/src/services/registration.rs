use crate::{
    entities::{course, registration, student_profile},
    error::{ServiceError, ServiceResult},
    services::course::CourseService,
};
use chrono::Utc;
use log::{info, warn};
use models::{
    access::Caller,
    registration::{RegistrationStatus, check_approved_cap, is_valid_grade},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

/// A change requested by the faculty member owning the course
#[derive(Debug, Clone, Default)]
pub struct RegistrationChange {
    pub status: Option<RegistrationStatus>,
    /// An empty grade clears it
    pub grade: Option<String>,
}

/// A registration with the identifiers clients know it by
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationView {
    pub registration: registration::Model,
    pub course_code: String,
    pub course_name: String,
    pub student_id: String,
}

pub struct RegistrationService;

impl RegistrationService {
    /// Enrolls the calling student in the course with the given code.
    ///
    /// The registration starts out pending. A student who already holds the
    /// maximum number of approved registrations cannot enroll in more.
    pub async fn register(
        db: &DatabaseConnection,
        caller: &Caller,
        code: &str,
    ) -> ServiceResult<RegistrationView> {
        let student_profile_id = caller.student()?;

        let txn = db.begin().await?;
        let course = CourseService::find_by_code(&txn, code).await?;
        if !course.is_active {
            return Err(ServiceError::conflict("This course is not active."));
        }

        let student = Self::lock_student(&txn, student_profile_id).await?;

        let already_registered = registration::Entity::find()
            .filter(registration::Column::StudentProfileId.eq(student.id))
            .filter(registration::Column::CourseId.eq(course.id))
            .count(&txn)
            .await?
            > 0;
        if already_registered {
            return Err(ServiceError::conflict(
                "You are already registered for this course.",
            ));
        }

        Self::enforce_approved_cap(&txn, student.id, None).await?;

        let registration = registration::ActiveModel {
            student_profile_id: Set(student.id),
            course_id: Set(course.id),
            status: Set(RegistrationStatus::Pending),
            registration_date: Set(Utc::now()),
            grade: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            ServiceError::on_unique_violation(e, "You are already registered for this course.")
        })?;

        txn.commit().await?;
        info!("Student {} registered for {}", student.student_id, course.code);

        Ok(RegistrationView {
            registration,
            course_code: course.code,
            course_name: course.name,
            student_id: student.student_id,
        })
    }

    /// Changes the status and/or grade of a registration in one of the
    /// caller's courses. Moving to approved is subject to the approved cap.
    pub async fn set_status(
        db: &DatabaseConnection,
        caller: &Caller,
        registration_id: i32,
        change: RegistrationChange,
    ) -> ServiceResult<RegistrationView> {
        let instructor_id = caller.faculty()?;
        if let Some(grade) = &change.grade
            && !is_valid_grade(grade)
        {
            return Err(ServiceError::validation(
                "grade must be at most 2 characters",
            ));
        }

        let txn = db.begin().await?;
        let (registration, course) = registration::Entity::find_by_id(registration_id)
            .find_also_related(course::Entity)
            .one(&txn)
            .await?
            .and_then(|(registration, course)| course.map(|course| (registration, course)))
            .filter(|(_, course)| course.instructor_id == instructor_id)
            .ok_or_else(|| ServiceError::not_found("Registration not found."))?;

        let student = Self::lock_student(&txn, registration.student_profile_id).await?;
        let status = change.status.unwrap_or(registration.status);
        if status == RegistrationStatus::Approved {
            Self::enforce_approved_cap(&txn, student.id, Some(registration.id)).await?;
        }

        let previous = registration.status;
        let mut active = registration.into_active_model();
        active.status = Set(status);
        if let Some(grade) = change.grade {
            active.grade = Set(Some(grade).filter(|g| !g.is_empty()));
        }
        let registration = active.update(&txn).await?;
        txn.commit().await?;

        if previous != status {
            info!(
                "Registration {} of {} in {} moved from {previous} to {status}",
                registration.id, student.student_id, course.code
            );
        }

        Ok(RegistrationView {
            registration,
            course_code: course.code,
            course_name: course.name,
            student_id: student.student_id,
        })
    }

    /// The calling student's registrations
    pub async fn list_for_student(
        db: &DatabaseConnection,
        caller: &Caller,
    ) -> ServiceResult<Vec<RegistrationView>> {
        let student_profile_id = caller.student()?;
        let student = student_profile::Entity::find_by_id(student_profile_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student profile not found."))?;

        let rows = registration::Entity::find()
            .filter(registration::Column::StudentProfileId.eq(student.id))
            .order_by_asc(registration::Column::Id)
            .find_also_related(course::Entity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(registration, course)| {
                course.map(|course| RegistrationView {
                    registration,
                    course_code: course.code,
                    course_name: course.name,
                    student_id: student.student_id.clone(),
                })
            })
            .collect())
    }

    /// Registrations in one of the caller's courses
    pub async fn list_for_course(
        db: &DatabaseConnection,
        caller: &Caller,
        code: &str,
    ) -> ServiceResult<Vec<RegistrationView>> {
        let course = CourseService::get_owned(db, caller, code).await?.course;

        let rows = registration::Entity::find()
            .filter(registration::Column::CourseId.eq(course.id))
            .order_by_asc(registration::Column::Id)
            .find_also_related(student_profile::Entity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(registration, student)| {
                student.map(|student| RegistrationView {
                    registration,
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    student_id: student.student_id,
                })
            })
            .collect())
    }

    /// The single place the approved cap is checked. Must run inside the
    /// transaction that writes the registration, after [`Self::lock_student`].
    async fn enforce_approved_cap<C: ConnectionTrait>(
        txn: &C,
        student_profile_id: i32,
        exclude: Option<i32>,
    ) -> ServiceResult<()> {
        let mut query = registration::Entity::find()
            .filter(registration::Column::StudentProfileId.eq(student_profile_id))
            .filter(registration::Column::Status.eq(RegistrationStatus::Approved));
        if let Some(id) = exclude {
            query = query.filter(registration::Column::Id.ne(id));
        }

        let other_approved = query.count(txn).await?;
        check_approved_cap(other_approved).inspect_err(|e| {
            warn!("Student profile {student_profile_id} rejected: {e}");
        })?;

        Ok(())
    }

    /// Locks the student's profile row so concurrent approvals for the same
    /// student serialize. A no-op on SQLite, which locks the whole database
    /// for writes anyway.
    async fn lock_student<C: ConnectionTrait>(
        txn: &C,
        student_profile_id: i32,
    ) -> ServiceResult<student_profile::Model> {
        student_profile::Entity::find_by_id(student_profile_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student profile not found."))
    }
}
