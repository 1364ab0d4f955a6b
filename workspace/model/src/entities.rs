//! Root for all SeaORM entity modules.
//! The shared brand catalog is global; pricing and quarterly settings are
//! owned by a single practice.

pub mod lens_brand;
pub mod practice;
pub mod practice_pricing;
pub mod practice_quarterly_settings;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::lens_brand::Entity as LensBrand;
    pub use super::practice::Entity as Practice;
    pub use super::practice_pricing::Entity as PracticePricing;
    pub use super::practice_quarterly_settings::Entity as PracticeQuarterlySettings;
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    async fn insert_practice(
        db: &DatabaseConnection,
        name: &str,
        email: &str,
    ) -> Result<practice::Model, DbErr> {
        practice::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set("not-a-real-hash".to_string()),
            role: Set(practice::PracticeRole::Practice),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    #[tokio::test]
    async fn test_seeded_catalog() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let brands = LensBrand::find().all(&db).await?;
        assert_eq!(brands.len(), 5);
        assert!(brands.iter().all(|b| b.is_active));
        assert!(brands.iter().all(|b| b.boxes_per_year >= 1));

        let biofinity = LensBrand::find()
            .filter(lens_brand::Column::BrandName.eq("Biofinity"))
            .one(&db)
            .await?
            .expect("Biofinity should be seeded");
        assert_eq!(biofinity.boxes_per_year, 4);
        assert_eq!(biofinity.competitor_price_per_box, Decimal::new(3599, 2));
        assert_eq!(biofinity.competitor_annual_rebate, Decimal::new(18, 0));

        Ok(())
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let practice1 = insert_practice(&db, "Clear View Optometry", "office@clearview.test").await?;
        let practice2 = insert_practice(&db, "Bright Eyes", "hello@brighteyes.test").await?;

        let brand = lens_brand::ActiveModel {
            brand_name: Set("Test Daily".to_string()),
            boxes_per_year: Set(12),
            competitor_price_per_box: Set(Decimal::new(4999, 2)),
            competitor_annual_rebate: Set(Decimal::new(30, 0)),
            competitor_semiannual_rebate: Set(Decimal::new(20, 0)),
            competitor_first_time_discount_percent: Set(Decimal::new(15, 0)),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let pricing = practice_pricing::ActiveModel {
            practice_id: Set(practice1.id),
            brand_id: Set(brand.id),
            price_per_box: Set(Some(Decimal::new(4599, 2))),
            manufacturer_rebate_new: Set(Some(Decimal::new(100, 0))),
            manufacturer_rebate_existing: Set(None),
            is_active: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        practice_quarterly_settings::ActiveModel {
            practice_id: Set(practice1.id),
            new_wearer_rebate_q1: Set(Decimal::new(25, 0)),
            new_wearer_rebate_q2: Set(Decimal::ZERO),
            new_wearer_rebate_q3: Set(Decimal::ZERO),
            new_wearer_rebate_q4: Set(Decimal::ZERO),
            existing_wearer_rebate_q1: Set(Decimal::new(10, 0)),
            existing_wearer_rebate_q2: Set(Decimal::ZERO),
            existing_wearer_rebate_q3: Set(Decimal::ZERO),
            existing_wearer_rebate_q4: Set(Decimal::ZERO),
        }
        .insert(&db)
        .await?;

        // Read back and verify data
        let stored = PracticePricing::find_by_id(pricing.id)
            .one(&db)
            .await?
            .expect("pricing row");
        assert_eq!(stored.price_per_box, Some(Decimal::new(4599, 2)));
        assert_eq!(stored.manufacturer_rebate_existing, None);

        let practice1_pricing = practice1.find_related(PracticePricing).all(&db).await?;
        assert_eq!(practice1_pricing.len(), 1);
        assert_eq!(practice1_pricing[0].brand_id, brand.id);

        let practice2_pricing = practice2.find_related(PracticePricing).count(&db).await?;
        assert_eq!(practice2_pricing, 0);

        let settings = practice1
            .find_related(PracticeQuarterlySettings)
            .one(&db)
            .await?
            .expect("settings row");
        assert_eq!(settings.new_wearer_rebate_q1, Decimal::new(25, 0));

        let role = Practice::find_by_id(practice1.id)
            .one(&db)
            .await?
            .map(|p| p.role);
        assert_eq!(role, Some(practice::PracticeRole::Practice));

        Ok(())
    }

    #[tokio::test]
    async fn test_one_pricing_row_per_practice_and_brand() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let practice = insert_practice(&db, "Solo Practice", "solo@practice.test").await?;
        let brand = LensBrand::find().one(&db).await?.expect("seeded brand");

        let row = || practice_pricing::ActiveModel {
            practice_id: Set(practice.id),
            brand_id: Set(brand.id),
            price_per_box: Set(Some(Decimal::new(30, 0))),
            manufacturer_rebate_new: Set(None),
            manufacturer_rebate_existing: Set(None),
            is_active: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        row().insert(&db).await?;
        let duplicate = row().insert(&db).await;
        assert!(duplicate.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_practice_email_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        insert_practice(&db, "First", "shared@practice.test").await?;
        let duplicate = insert_practice(&db, "Second", "shared@practice.test").await;
        assert!(duplicate.is_err());

        Ok(())
    }
}
