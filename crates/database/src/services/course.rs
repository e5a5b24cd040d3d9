use crate::{
    entities::{course, faculty_profile, registration},
    error::{ServiceError, ServiceResult},
    services::page::{Page, check_page_in_range, check_page_params},
};
use chrono::Utc;
use log::info;
use models::{access::Caller, course_code::course_code, difficulty::Difficulty};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
    TransactionTrait,
};

const MAX_NAME_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub difficulty: Difficulty,
}

/// Full replacement of the editable fields. An absent `description` or
/// `is_active` keeps the current value.
#[derive(Debug, Clone)]
pub struct CourseUpdate {
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub difficulty: Difficulty,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub is_active: Option<bool>,
}

/// A course together with the display name of its instructor
#[derive(Debug, Clone, PartialEq)]
pub struct CourseView {
    pub course: course::Model,
    pub instructor_name: String,
}

impl CourseView {
    fn from_pair((course, instructor): (course::Model, Option<faculty_profile::Model>)) -> Self {
        let instructor_name = instructor
            .map(|profile| profile.full_name())
            .unwrap_or_else(|| "No name provided".to_owned());

        Self {
            course,
            instructor_name,
        }
    }
}

pub struct CourseService;

impl CourseService {
    /// Creates a course owned by the calling faculty member. The code is
    /// derived here, once, and the course always starts out active.
    pub async fn create(
        db: &DatabaseConnection,
        caller: &Caller,
        new: NewCourse,
    ) -> ServiceResult<CourseView> {
        let instructor_id = caller.faculty()?;
        check_name(&new.name)?;
        check_duration(new.duration)?;

        let code = course_code(&new.name, new.description.as_deref());
        let txn = db.begin().await?;

        let exists = course::Entity::find()
            .filter(course::Column::Code.eq(&code))
            .count(&txn)
            .await?
            > 0;
        if exists {
            return Err(ServiceError::conflict(format!(
                "A course with code {code} already exists."
            )));
        }

        let now = Utc::now();
        let course = course::ActiveModel {
            name: Set(new.name),
            code: Set(code),
            description: Set(new.description),
            duration: Set(new.duration),
            difficulty: Set(new.difficulty),
            instructor_id: Set(instructor_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::on_unique_violation(e, "A course with this code already exists."))?;

        let instructor = faculty_profile::Entity::find_by_id(instructor_id)
            .one(&txn)
            .await?;
        txn.commit().await?;

        info!(
            "Faculty {} created course {} ({})",
            caller.username, course.code, course.name
        );
        Ok(CourseView::from_pair((course, instructor)))
    }

    /// Courses owned by the calling faculty member
    pub async fn list_for_faculty(
        db: &DatabaseConnection,
        caller: &Caller,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<Page<CourseView>> {
        let instructor_id = caller.faculty()?;
        let query = course::Entity::find().filter(course::Column::InstructorId.eq(instructor_id));

        Self::paginate(db, query, page, per_page).await
    }

    /// Every course, for unauthenticated browsing
    pub async fn list_public(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<Page<CourseView>> {
        Self::paginate(db, course::Entity::find(), page, per_page).await
    }

    /// Looks up one of the caller's courses by code. Courses owned by someone
    /// else are reported as missing.
    pub async fn get_owned(
        db: &DatabaseConnection,
        caller: &Caller,
        code: &str,
    ) -> ServiceResult<CourseView> {
        let instructor_id = caller.faculty()?;
        let pair = course::Entity::find()
            .filter(course::Column::Code.eq(code))
            .filter(course::Column::InstructorId.eq(instructor_id))
            .find_also_related(faculty_profile::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course not found."))?;

        Ok(CourseView::from_pair(pair))
    }

    pub async fn replace(
        db: &DatabaseConnection,
        caller: &Caller,
        code: &str,
        update: CourseUpdate,
    ) -> ServiceResult<CourseView> {
        let patch = CoursePatch {
            name: Some(update.name),
            description: update.description,
            duration: Some(update.duration),
            difficulty: Some(update.difficulty),
            is_active: update.is_active,
        };

        Self::patch(db, caller, code, patch).await
    }

    /// Applies the given changes. The course code is never recomputed, even
    /// when the name or description change.
    pub async fn patch(
        db: &DatabaseConnection,
        caller: &Caller,
        code: &str,
        patch: CoursePatch,
    ) -> ServiceResult<CourseView> {
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(duration) = patch.duration {
            check_duration(duration)?;
        }

        let CourseView {
            course,
            instructor_name,
        } = Self::get_owned(db, caller, code).await?;

        let mut active = course.into_active_model();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        if let Some(duration) = patch.duration {
            active.duration = Set(duration);
        }
        if let Some(difficulty) = patch.difficulty {
            active.difficulty = Set(difficulty);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let course = active.update(db).await?;
        info!("Faculty {} updated course {}", caller.username, course.code);

        Ok(CourseView {
            course,
            instructor_name,
        })
    }

    /// Deletes one of the caller's courses along with its registrations
    pub async fn delete(db: &DatabaseConnection, caller: &Caller, code: &str) -> ServiceResult<()> {
        let CourseView { course, .. } = Self::get_owned(db, caller, code).await?;

        let txn = db.begin().await?;
        let removed = registration::Entity::delete_many()
            .filter(registration::Column::CourseId.eq(course.id))
            .exec(&txn)
            .await?;
        course::Entity::delete_by_id(course.id).exec(&txn).await?;
        txn.commit().await?;

        info!(
            "Faculty {} deleted course {} and {} registration(s)",
            caller.username, course.code, removed.rows_affected
        );
        Ok(())
    }

    /// Finds a course by code regardless of owner
    pub(crate) async fn find_by_code<C: ConnectionTrait>(
        db: &C,
        code: &str,
    ) -> ServiceResult<course::Model> {
        course::Entity::find()
            .filter(course::Column::Code.eq(code))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course not found."))
    }

    async fn paginate(
        db: &DatabaseConnection,
        query: Select<course::Entity>,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<Page<CourseView>> {
        check_page_params(page, per_page)?;

        let paginator = query
            .order_by_asc(course::Column::Id)
            .find_also_related(faculty_profile::Entity)
            .paginate(db, per_page);

        let total_items = paginator.num_items().await?;
        check_page_in_range(page, per_page, total_items)?;
        // SeaORM pages are 0-based
        let items = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(CourseView::from_pair)
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total_items,
        })
    }
}

fn check_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::validation("course_name may not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ServiceError::validation(format!(
            "course_name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    Ok(())
}

fn check_duration(duration: i32) -> ServiceResult<()> {
    if duration <= 0 {
        return Err(ServiceError::validation("duration must be a positive number of days"));
    }

    Ok(())
}
