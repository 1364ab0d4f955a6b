use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::practice;

/// A practice's own promotional rebates for each fiscal quarter, split by
/// new and existing wearers. A missing row means every rebate is zero.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "practice_quarterly_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub practice_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub new_wearer_rebate_q1: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub new_wearer_rebate_q2: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub new_wearer_rebate_q3: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub new_wearer_rebate_q4: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub existing_wearer_rebate_q1: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub existing_wearer_rebate_q2: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub existing_wearer_rebate_q3: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub existing_wearer_rebate_q4: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "practice::Entity",
        from = "Column::PracticeId",
        to = "practice::Column::Id",
        on_delete = "Cascade"
    )]
    Practice,
}

impl Related<practice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Practice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
