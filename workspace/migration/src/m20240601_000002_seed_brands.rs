use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Starter catalog: (brand, boxes/year, price/box, annual, semiannual, first-time %).
const DEFAULT_BRANDS: [(&str, i32, &str, &str, &str, &str); 5] = [
    ("Acuvue Oasys", 4, "52.99", "25.00", "15.00", "10.00"),
    ("Dailies Total1", 12, "49.99", "30.00", "20.00", "15.00"),
    ("Air Optix Aqua", 4, "38.99", "20.00", "12.00", "8.00"),
    ("Biofinity", 4, "35.99", "18.00", "10.00", "5.00"),
    ("Acuvue Moist", 12, "45.99", "25.00", "15.00", "10.00"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        // Only seed an empty catalog
        let existing = db
            .query_one(Statement::from_string(
                backend,
                "SELECT COUNT(*) AS brand_count FROM lens_brands".to_owned(),
            ))
            .await?;
        let count: i64 = match existing {
            Some(row) => row.try_get("", "brand_count")?,
            None => 0,
        };
        if count > 0 {
            return Ok(());
        }

        let values = DEFAULT_BRANDS
            .iter()
            .map(|(name, boxes, price, annual, semiannual, discount)| {
                format!(
                    "('{}', {}, {}, {}, {}, {})",
                    name, boxes, price, annual, semiannual, discount
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        db.execute_unprepared(&format!(
            "INSERT INTO lens_brands (brand_name, boxes_per_year, competitor_price_per_box, \
             competitor_annual_rebate, competitor_semiannual_rebate, \
             competitor_first_time_discount_percent) VALUES {}",
            values
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names = DEFAULT_BRANDS
            .iter()
            .map(|(name, ..)| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(", ");

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DELETE FROM lens_brands WHERE brand_name IN ({})",
                names
            ))
            .await?;

        Ok(())
    }
}
