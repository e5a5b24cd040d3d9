//! Role-based access policy.
//!
//! Every operation that depends on who is asking takes an explicit [`Caller`].
//! Public operations simply take no caller.

use crate::role::Role;

/// The authenticated identity an operation runs on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub student_profile_id: Option<i32>,
    pub faculty_profile_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Only faculty members can perform this action.")]
    NotFaculty,
    #[error("Only students can perform this action.")]
    NotStudent,
}

impl Caller {
    /// Authenticated user with an associated faculty profile
    pub fn is_faculty(&self) -> bool {
        self.faculty_profile_id.is_some()
    }

    /// Authenticated user with an associated student profile
    pub fn is_student(&self) -> bool {
        self.student_profile_id.is_some()
    }

    /// The caller's faculty profile id, or an error if they have none
    pub fn faculty(&self) -> Result<i32, AccessDenied> {
        self.faculty_profile_id.ok_or(AccessDenied::NotFaculty)
    }

    /// The caller's student profile id, or an error if they have none
    pub fn student(&self) -> Result<i32, AccessDenied> {
        self.student_profile_id.ok_or(AccessDenied::NotStudent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role, student: Option<i32>, faculty: Option<i32>) -> Caller {
        Caller {
            user_id: 1,
            username: "someone".to_owned(),
            role,
            student_profile_id: student,
            faculty_profile_id: faculty,
        }
    }

    #[test]
    fn test_faculty_policy() {
        let faculty = caller(Role::Faculty, None, Some(9));
        assert!(faculty.is_faculty());
        assert!(!faculty.is_student());
        assert_eq!(faculty.faculty(), Ok(9));
        assert_eq!(faculty.student(), Err(AccessDenied::NotStudent));
    }

    #[test]
    fn test_student_policy() {
        let student = caller(Role::Student, Some(4), None);
        assert!(student.is_student());
        assert_eq!(student.student(), Ok(4));
        assert_eq!(student.faculty(), Err(AccessDenied::NotFaculty));
    }

    #[test]
    fn test_policy_follows_profile_not_role_tag() {
        // A faculty-tagged user whose profile is missing is not treated as faculty
        let orphan = caller(Role::Faculty, None, None);
        assert!(!orphan.is_faculty());
        assert_eq!(orphan.faculty(), Err(AccessDenied::NotFaculty));
    }
}
