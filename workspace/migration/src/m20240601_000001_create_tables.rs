use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create practices table
        manager
            .create_table(
                Table::create()
                    .table(Practices::Table)
                    .if_not_exists()
                    .col(pk_auto(Practices::Id))
                    .col(string(Practices::Name))
                    .col(string(Practices::Email).unique_key())
                    .col(string(Practices::PasswordHash))
                    .col(string_len(Practices::Role, 20).default("practice"))
                    .col(timestamp_with_time_zone(Practices::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create lens_brands table (shared catalog)
        manager
            .create_table(
                Table::create()
                    .table(LensBrands::Table)
                    .if_not_exists()
                    .col(pk_auto(LensBrands::Id))
                    .col(string(LensBrands::BrandName).unique_key())
                    .col(integer(LensBrands::BoxesPerYear))
                    .col(decimal(LensBrands::CompetitorPricePerBox).decimal_len(10, 2).default(0))
                    .col(decimal(LensBrands::CompetitorAnnualRebate).decimal_len(10, 2).default(0))
                    .col(decimal(LensBrands::CompetitorSemiannualRebate).decimal_len(10, 2).default(0))
                    .col(
                        decimal(LensBrands::CompetitorFirstTimeDiscountPercent)
                            .decimal_len(5, 2)
                            .default(0),
                    )
                    .col(boolean(LensBrands::IsActive).default(true))
                    .check(Expr::col(LensBrands::BoxesPerYear).gte(1))
                    .to_owned(),
            )
            .await?;

        // Create practice_pricing table
        manager
            .create_table(
                Table::create()
                    .table(PracticePricing::Table)
                    .if_not_exists()
                    .col(pk_auto(PracticePricing::Id))
                    .col(integer(PracticePricing::PracticeId))
                    .col(integer(PracticePricing::BrandId))
                    .col(decimal_null(PracticePricing::PricePerBox).decimal_len(10, 2))
                    .col(decimal_null(PracticePricing::ManufacturerRebateNew).decimal_len(10, 2))
                    .col(decimal_null(PracticePricing::ManufacturerRebateExisting).decimal_len(10, 2))
                    .col(boolean(PracticePricing::IsActive).default(true))
                    .col(timestamp_with_time_zone(PracticePricing::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_practice_pricing_practice")
                            .from(PracticePricing::Table, PracticePricing::PracticeId)
                            .to(Practices::Table, Practices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_practice_pricing_brand")
                            .from(PracticePricing::Table, PracticePricing::BrandId)
                            .to(LensBrands::Table, LensBrands::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_practice_pricing_practice_brand")
                    .table(PracticePricing::Table)
                    .col(PracticePricing::PracticeId)
                    .col(PracticePricing::BrandId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create practice_quarterly_settings table (one row per practice)
        manager
            .create_table(
                Table::create()
                    .table(PracticeQuarterlySettings::Table)
                    .if_not_exists()
                    .col(integer(PracticeQuarterlySettings::PracticeId).primary_key())
                    .col(decimal(PracticeQuarterlySettings::NewWearerRebateQ1).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::NewWearerRebateQ2).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::NewWearerRebateQ3).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::NewWearerRebateQ4).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::ExistingWearerRebateQ1).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::ExistingWearerRebateQ2).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::ExistingWearerRebateQ3).decimal_len(10, 2).default(0))
                    .col(decimal(PracticeQuarterlySettings::ExistingWearerRebateQ4).decimal_len(10, 2).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_practice_quarterly_settings_practice")
                            .from(PracticeQuarterlySettings::Table, PracticeQuarterlySettings::PracticeId)
                            .to(Practices::Table, Practices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(PracticeQuarterlySettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PracticePricing::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LensBrands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Practices::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Practices {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum LensBrands {
    Table,
    Id,
    BrandName,
    BoxesPerYear,
    CompetitorPricePerBox,
    CompetitorAnnualRebate,
    CompetitorSemiannualRebate,
    CompetitorFirstTimeDiscountPercent,
    IsActive,
}

#[derive(DeriveIden)]
enum PracticePricing {
    Table,
    Id,
    PracticeId,
    BrandId,
    PricePerBox,
    ManufacturerRebateNew,
    ManufacturerRebateExisting,
    IsActive,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PracticeQuarterlySettings {
    Table,
    PracticeId,
    NewWearerRebateQ1,
    NewWearerRebateQ2,
    NewWearerRebateQ3,
    NewWearerRebateQ4,
    ExistingWearerRebateQ1,
    ExistingWearerRebateQ2,
    ExistingWearerRebateQ3,
    ExistingWearerRebateQ4,
}
