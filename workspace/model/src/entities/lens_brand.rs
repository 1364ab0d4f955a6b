use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A lens product line in the shared catalog, with the online competitor's
/// pricing for it. Maintained by the master admin only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lens_brands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub brand_name: String,
    /// Boxes a wearer goes through in a year; always at least 1.
    pub boxes_per_year: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub competitor_price_per_box: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub competitor_annual_rebate: Decimal,
    /// Catalog data only; the comparison does not use it.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub competitor_semiannual_rebate: Decimal,
    /// Catalog data only; the comparison does not use it.
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub competitor_first_time_discount_percent: Decimal,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::practice_pricing::Entity")]
    PracticePricing,
}

impl Related<super::practice_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PracticePricing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
