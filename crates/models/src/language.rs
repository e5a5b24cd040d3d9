use serde::{Deserialize, Serialize};

#[cfg(feature = "database")]
use sea_orm::entity::prelude::*;

/// Language a student prefers course material in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
pub enum PreferredLanguage {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "english"))]
    English,
    #[cfg_attr(feature = "database", sea_orm(string_value = "hindi"))]
    Hindi,
}
