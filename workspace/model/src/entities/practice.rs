use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Capability of an account, decided at registration and carried in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PracticeRole {
    /// A tenant practice pricing its own inventory
    #[sea_orm(string_value = "practice")]
    Practice,
    /// The master admin maintaining the shared brand catalog
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl PracticeRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, PracticeRole::Admin)
    }
}

/// A tenant account: an eye-care practice using the comparison tool.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "practices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string, never the plaintext password.
    pub password_hash: String,
    pub role: PracticeRole,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::practice_pricing::Entity")]
    PracticePricing,
    #[sea_orm(has_one = "super::practice_quarterly_settings::Entity")]
    PracticeQuarterlySettings,
}

impl Related<super::practice_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PracticePricing.def()
    }
}

impl Related<super::practice_quarterly_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PracticeQuarterlySettings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
