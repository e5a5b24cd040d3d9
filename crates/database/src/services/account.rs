use crate::{
    entities::{faculty_profile, student_profile, user},
    error::{ServiceError, ServiceResult},
    services::password::{hash_password, verify_password},
};
use chrono::Utc;
use log::{info, warn};
use models::{
    access::Caller, identifier::profile_identifier, language::PreferredLanguage, role::Role,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

const MAX_USERNAME_LEN: usize = 255;
const MAX_STUDENT_NAME_LEN: usize = 63;
const MAX_FACULTY_FIELD_LEN: usize = 255;
const PHONE_LEN: std::ops::RangeInclusive<usize> = 10..=15;

pub const EMAIL_TAKEN: &str = "This email is already in use.";
pub const IDENTIFIER_TAKEN: &str = "Could not assign a unique profile identifier, please retry.";

#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub biography: Option<String>,
    pub preferred_language: Option<PreferredLanguage>,
}

#[derive(Debug, Clone, Default)]
pub struct NewFaculty {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
}

/// A freshly created user together with its profile
#[derive(Debug, Clone)]
pub struct Account<P> {
    pub user: user::Model,
    pub profile: P,
}

pub struct AccountService;

impl AccountService {
    /// How many identifiers to draw before giving up on a collision-free one
    const IDENTIFIER_ATTEMPTS: usize = 5;

    /// Creates a student user and its profile in one transaction
    pub async fn register_student(
        db: &DatabaseConnection,
        new: NewStudent,
    ) -> ServiceResult<Account<student_profile::Model>> {
        Self::check_credentials(&new.username, &new.password)?;
        check_len("first_name", new.first_name.as_deref(), MAX_STUDENT_NAME_LEN)?;
        check_len("last_name", new.last_name.as_deref(), MAX_STUDENT_NAME_LEN)?;
        check_email(new.email.as_deref())?;
        if let Some(phone) = new.phone_number.as_deref()
            && !PHONE_LEN.contains(&phone.chars().count())
        {
            return Err(ServiceError::validation(
                "phone_number must be between 10 and 15 characters",
            ));
        }

        let txn = db.begin().await?;
        let user = Self::insert_user(&txn, &new.username, &new.password, Role::Student).await?;
        let student_id = Self::new_identifier(&txn, Role::Student, user.id).await?;

        let profile = student_profile::ActiveModel {
            user_id: Set(user.id),
            student_id: Set(student_id),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            phone_number: Set(new.phone_number),
            biography: Set(new.biography),
            preferred_language: Set(new.preferred_language.unwrap_or_default()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            ServiceError::on_unique_violation_of(e, &[("student_id", IDENTIFIER_TAKEN)], EMAIL_TAKEN)
        })?;

        txn.commit().await?;
        info!(
            "Created student account '{}' ({})",
            user.username, profile.student_id
        );

        Ok(Account { user, profile })
    }

    /// Creates a faculty user and its profile in one transaction
    pub async fn register_faculty(
        db: &DatabaseConnection,
        new: NewFaculty,
    ) -> ServiceResult<Account<faculty_profile::Model>> {
        Self::check_credentials(&new.username, &new.password)?;
        for (field, value) in [
            ("first_name", &new.first_name),
            ("last_name", &new.last_name),
            ("department", &new.department),
            ("designation", &new.designation),
        ] {
            check_len(field, value.as_deref(), MAX_FACULTY_FIELD_LEN)?;
        }
        check_email(new.email.as_deref())?;

        let txn = db.begin().await?;
        let user = Self::insert_user(&txn, &new.username, &new.password, Role::Faculty).await?;
        let faculty_id = Self::new_identifier(&txn, Role::Faculty, user.id).await?;

        let profile = faculty_profile::ActiveModel {
            user_id: Set(user.id),
            faculty_id: Set(faculty_id),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            department: Set(new.department),
            designation: Set(new.designation),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            ServiceError::on_unique_violation_of(e, &[("faculty_id", IDENTIFIER_TAKEN)], EMAIL_TAKEN)
        })?;

        txn.commit().await?;
        info!(
            "Created faculty account '{}' ({})",
            user.username, profile.faculty_id
        );

        Ok(Account { user, profile })
    }

    /// Verifies credentials and that the user holds a profile for `role`.
    ///
    /// Unknown users, wrong passwords and deactivated users are indistinguishable
    /// to the client.
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
        role: Role,
    ) -> ServiceResult<Caller> {
        let invalid = || ServiceError::Unauthorized("Invalid credentials.".to_owned());

        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or_else(invalid)?;

        if !user.is_active || !verify_password(password, &user.password_hash)? {
            warn!("Rejected login for '{username}'");
            return Err(invalid());
        }

        let caller = Self::caller_for(db, user).await?;
        let has_profile = match role {
            Role::Student => caller.is_student(),
            Role::Faculty => caller.is_faculty(),
        };
        if !has_profile {
            return Err(ServiceError::validation(format!("User is not a {role}.")));
        }

        Ok(caller)
    }

    /// Loads the caller identity for an authenticated user id
    pub async fn resolve_caller(db: &DatabaseConnection, user_id: i32) -> ServiceResult<Caller> {
        let user = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| ServiceError::Unauthorized("User not found or inactive.".to_owned()))?;

        Self::caller_for(db, user).await
    }

    async fn caller_for<C: ConnectionTrait>(db: &C, user: user::Model) -> ServiceResult<Caller> {
        let student = student_profile::Entity::find()
            .filter(student_profile::Column::UserId.eq(user.id))
            .one(db)
            .await?;
        let faculty = faculty_profile::Entity::find()
            .filter(faculty_profile::Column::UserId.eq(user.id))
            .one(db)
            .await?;

        Ok(Caller {
            user_id: user.id,
            username: user.username,
            role: user.role,
            student_profile_id: student.map(|p| p.id),
            faculty_profile_id: faculty.map(|p| p.id),
        })
    }

    fn check_credentials(username: &str, password: &str) -> ServiceResult<()> {
        if username.trim().is_empty() {
            return Err(ServiceError::validation("User must have an username."));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(ServiceError::validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        if password.is_empty() {
            return Err(ServiceError::validation("User must have a password."));
        }

        Ok(())
    }

    async fn insert_user<C: ConnectionTrait>(
        txn: &C,
        username: &str,
        password: &str,
        role: Role,
    ) -> ServiceResult<user::Model> {
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(txn)
            .await?
            > 0;
        if taken {
            return Err(ServiceError::conflict("A user with that username already exists."));
        }

        let now = Utc::now();
        user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(hash_password(password)?),
            role: Set(role),
            is_active: Set(true),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| {
            ServiceError::on_unique_violation(e, "A user with that username already exists.")
        })
    }

    /// Draws profile identifiers until one is not taken yet
    async fn new_identifier<C: ConnectionTrait>(
        txn: &C,
        role: Role,
        user_id: i32,
    ) -> ServiceResult<String> {
        for _ in 0..Self::IDENTIFIER_ATTEMPTS {
            let candidate = profile_identifier(role, user_id, &mut rand::thread_rng());
            if !Self::identifier_taken(txn, role, &candidate).await? {
                return Ok(candidate);
            }
            warn!("Profile identifier {candidate} already taken, drawing another");
        }

        Err(ServiceError::conflict(IDENTIFIER_TAKEN))
    }

    async fn identifier_taken<C: ConnectionTrait>(
        txn: &C,
        role: Role,
        candidate: &str,
    ) -> ServiceResult<bool> {
        let count = match role {
            Role::Student => {
                student_profile::Entity::find()
                    .filter(student_profile::Column::StudentId.eq(candidate))
                    .count(txn)
                    .await?
            }
            Role::Faculty => {
                faculty_profile::Entity::find()
                    .filter(faculty_profile::Column::FacultyId.eq(candidate))
                    .count(txn)
                    .await?
            }
        };

        Ok(count > 0)
    }
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> ServiceResult<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(ServiceError::validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

fn check_email(email: Option<&str>) -> ServiceResult<()> {
    match email {
        Some(email) if !email.contains('@') => {
            Err(ServiceError::validation("Enter a valid email address."))
        }
        _ => Ok(()),
    }
}
