use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{lens_brand, practice};

/// A practice's own price and manufacturer rebates for one catalog brand.
/// At most one row exists per (practice, brand) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "practice_pricing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub practice_id: i32,
    pub brand_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price_per_box: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub manufacturer_rebate_new: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub manufacturer_rebate_existing: Option<Decimal>,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(
        belongs_to = "lens_brand::Entity",
        from = "Column::BrandId",
        to = "lens_brand::Column::Id",
        on_delete = "Cascade"
    )]
    LensBrand,
}

impl Related<practice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Practice.def()
    }
}

impl Related<lens_brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LensBrand.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
