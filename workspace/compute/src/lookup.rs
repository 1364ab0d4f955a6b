//! Loads the rows a comparison needs for one practice and brand.

use async_trait::async_trait;
use model::entities::{practice_pricing, prelude::*};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, instrument, trace};

use crate::comparison::ComparisonInputs;
use crate::convert::{brand_to_dto, pricing_to_dto, settings_to_rebates};
use crate::error::Result;

/// Source of comparison inputs keyed by practice and brand.
#[async_trait]
pub trait PricingLookup: Send + Sync {
    /// Returns the brand joined with the practice's active pricing and its
    /// quarterly settings, or `None` when the brand or active pricing is missing.
    async fn find_comparison_inputs(
        &self,
        practice_id: i32,
        brand_id: i32,
    ) -> Result<Option<ComparisonInputs>>;
}

#[async_trait]
impl PricingLookup for DatabaseConnection {
    #[instrument(skip(self))]
    async fn find_comparison_inputs(
        &self,
        practice_id: i32,
        brand_id: i32,
    ) -> Result<Option<ComparisonInputs>> {
        trace!("Entering find_comparison_inputs");

        let Some(brand) = LensBrand::find_by_id(brand_id).one(self).await? else {
            debug!("Brand {} does not exist", brand_id);
            return Ok(None);
        };

        let Some(pricing) = PracticePricing::find()
            .filter(practice_pricing::Column::PracticeId.eq(practice_id))
            .filter(practice_pricing::Column::BrandId.eq(brand_id))
            .filter(practice_pricing::Column::IsActive.eq(true))
            .one(self)
            .await?
        else {
            debug!("Practice {} has no active pricing for brand {}", practice_id, brand_id);
            return Ok(None);
        };

        let settings = PracticeQuarterlySettings::find_by_id(practice_id)
            .one(self)
            .await?;

        Ok(Some(ComparisonInputs {
            brand: brand_to_dto(&brand),
            pricing: pricing_to_dto(&pricing),
            settings: settings.as_ref().map(settings_to_rebates),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{ComparisonCalculator, compare_for_practice};
    use crate::error::ComputeError;
    use chrono::Utc;
    use common::{ComparisonRequest, Quarter};
    use migration::{Migrator, MigratorTrait};
    use model::entities::{lens_brand, practice, practice_quarterly_settings};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DbErr, Set};

    async fn setup_db() -> std::result::Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
        Migrator::up(&db, None).await?;
        Ok(db)
    }

    async fn insert_practice(db: &DatabaseConnection, email: &str) -> practice::Model {
        practice::ActiveModel {
            name: Set("Clear View Optometry".to_string()),
            email: Set(email.to_string()),
            password_hash: Set("hash".to_string()),
            role: Set(practice::PracticeRole::Practice),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    async fn biofinity(db: &DatabaseConnection) -> lens_brand::Model {
        LensBrand::find()
            .filter(lens_brand::Column::BrandName.eq("Biofinity"))
            .one(db)
            .await
            .unwrap()
            .expect("seeded brand")
    }

    async fn insert_pricing(
        db: &DatabaseConnection,
        practice_id: i32,
        brand_id: i32,
        is_active: bool,
    ) -> practice_pricing::Model {
        practice_pricing::ActiveModel {
            practice_id: Set(practice_id),
            brand_id: Set(brand_id),
            price_per_box: Set(Some(Decimal::new(3599, 2))),
            manufacturer_rebate_new: Set(Some(Decimal::new(20, 0))),
            manufacturer_rebate_existing: Set(None),
            is_active: Set(is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_joins_brand_pricing_and_settings() {
        let db = setup_db().await.unwrap();
        let practice = insert_practice(&db, "lookup@practice.test").await;
        let brand = biofinity(&db).await;
        insert_pricing(&db, practice.id, brand.id, true).await;

        let inputs = db
            .find_comparison_inputs(practice.id, brand.id)
            .await
            .unwrap()
            .expect("inputs");
        assert_eq!(inputs.brand.brand_name, "Biofinity");
        assert_eq!(inputs.pricing.price_per_box, Some(Decimal::new(3599, 2)));
        assert_eq!(inputs.settings, None);

        practice_quarterly_settings::ActiveModel {
            practice_id: Set(practice.id),
            new_wearer_rebate_q1: Set(Decimal::new(10, 0)),
            new_wearer_rebate_q2: Set(Decimal::ZERO),
            new_wearer_rebate_q3: Set(Decimal::ZERO),
            new_wearer_rebate_q4: Set(Decimal::ZERO),
            existing_wearer_rebate_q1: Set(Decimal::ZERO),
            existing_wearer_rebate_q2: Set(Decimal::ZERO),
            existing_wearer_rebate_q3: Set(Decimal::ZERO),
            existing_wearer_rebate_q4: Set(Decimal::ZERO),
        }
        .insert(&db)
        .await
        .unwrap();

        let inputs = db
            .find_comparison_inputs(practice.id, brand.id)
            .await
            .unwrap()
            .expect("inputs");
        let settings = inputs.settings.expect("settings");
        assert_eq!(settings.new_wearer_rebate_q1, Decimal::new(10, 0));
    }

    #[tokio::test]
    async fn test_lookup_ignores_inactive_and_foreign_pricing() {
        let db = setup_db().await.unwrap();
        let owner = insert_practice(&db, "owner@practice.test").await;
        let other = insert_practice(&db, "other@practice.test").await;
        let brand = biofinity(&db).await;
        insert_pricing(&db, owner.id, brand.id, false).await;

        assert!(db.find_comparison_inputs(owner.id, brand.id).await.unwrap().is_none());
        assert!(db.find_comparison_inputs(other.id, brand.id).await.unwrap().is_none());
        assert!(db.find_comparison_inputs(owner.id, 9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_compare_for_practice_against_database() {
        let db = setup_db().await.unwrap();
        let practice = insert_practice(&db, "compare@practice.test").await;
        let brand = biofinity(&db).await;
        insert_pricing(&db, practice.id, brand.id, true).await;

        let calculator = ComparisonCalculator::default();
        let request = ComparisonRequest {
            brand_id: Some(brand.id),
            insurance_benefit: None,
            is_new_wearer: true,
        };

        // Biofinity's competitor price is 35.99 with an 18 annual rebate
        let result = compare_for_practice(&db, &calculator, practice.id, &request, Quarter::Q3)
            .await
            .unwrap();
        assert_eq!(result.practice.final_amount_after_rebates, Decimal::new(12396, 2));
        assert_eq!(result.competitor.final_amount, Decimal::new(12596, 2));
        assert_eq!(result.savings.total_savings, Decimal::new(2, 0));

        let missing = ComparisonRequest {
            brand_id: Some(9999),
            ..request
        };
        let err = compare_for_practice(&db, &calculator, practice.id, &missing, Quarter::Q3)
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::NotFound(_)));
    }
}
