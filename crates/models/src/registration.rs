use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "database")]
use sea_orm::entity::prelude::*;

/// Maximum number of registrations a student may hold in the approved state
pub const APPROVED_CAP: u64 = 2;

/// Longest grade string a registration can carry
pub const MAX_GRADE_LEN: usize = 2;

/// Approval workflow state of a registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "pending"))]
    Pending,
    #[cfg_attr(feature = "database", sea_orm(string_value = "approved"))]
    Approved,
    #[cfg_attr(feature = "database", sea_orm(string_value = "rejected"))]
    Rejected,
    #[cfg_attr(feature = "database", sea_orm(string_value = "completed"))]
    Completed,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl Display for RegistrationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Students can only register for a maximum of {cap} courses.")]
pub struct CapExceeded {
    pub cap: u64,
}

/// Checks the approved cap given how many *other* approved registrations the
/// student already holds, excluding the registration being saved.
pub fn check_approved_cap(other_approved: u64) -> Result<(), CapExceeded> {
    if other_approved >= APPROVED_CAP {
        return Err(CapExceeded { cap: APPROVED_CAP });
    }

    Ok(())
}

/// Whether a grade value fits the registration's grade column
pub fn is_valid_grade(grade: &str) -> bool {
    grade.chars().count() <= MAX_GRADE_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_allows_up_to_two() {
        assert!(check_approved_cap(0).is_ok());
        assert!(check_approved_cap(1).is_ok());
        assert_eq!(check_approved_cap(2), Err(CapExceeded { cap: 2 }));
        assert_eq!(check_approved_cap(5), Err(CapExceeded { cap: 2 }));
    }

    #[test]
    fn test_cap_message() {
        let err = check_approved_cap(2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Students can only register for a maximum of 2 courses."
        );
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Pending);
        let parsed: RegistrationStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(parsed, RegistrationStatus::Approved);
        assert_eq!(RegistrationStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_grade_length() {
        assert!(is_valid_grade(""));
        assert!(is_valid_grade("A+"));
        assert!(!is_valid_grade("A++"));
    }
}
