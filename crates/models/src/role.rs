use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "database")]
use sea_orm::entity::prelude::*;

/// The kind of account a user holds. Fixed when the account is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[cfg_attr(feature = "database", sea_orm(string_value = "student"))]
    Student,
    #[cfg_attr(feature = "database", sea_orm(string_value = "faculty"))]
    Faculty,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
        }
    }

    /// Prefix of the identifier assigned to this role's profile
    pub fn identifier_prefix(self) -> &'static str {
        match self {
            Self::Student => "STU",
            Self::Faculty => "FAC",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Faculty).unwrap(), "\"faculty\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_identifier_prefix() {
        assert_eq!(Role::Student.identifier_prefix(), "STU");
        assert_eq!(Role::Faculty.identifier_prefix(), "FAC");
    }
}
