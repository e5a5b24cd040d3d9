use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "database")]
use sea_orm::entity::prelude::*;

/// Difficulty level of a course, stored and transmitted as 1, 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "i16", db_type = "SmallInteger"))]
#[serde(try_from = "i16", into = "i16")]
pub enum Difficulty {
    #[cfg_attr(feature = "database", sea_orm(num_value = 1))]
    Beginner,
    #[cfg_attr(feature = "database", sea_orm(num_value = 2))]
    Intermediate,
    #[cfg_attr(feature = "database", sea_orm(num_value = 3))]
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("difficulty level must be 1, 2 or 3, got {0}")]
pub struct InvalidDifficulty(pub i16);

impl Difficulty {
    pub fn level(self) -> i16 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl TryFrom<i16> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(level: i16) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::Beginner),
            2 => Ok(Self::Intermediate),
            3 => Ok(Self::Advanced),
            other => Err(InvalidDifficulty(other)),
        }
    }
}

impl From<Difficulty> for i16 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.level()
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}
