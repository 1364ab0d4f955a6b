//! Conversions from stored entities to the transport types the calculator and
//! the API work with.

use common::{BrandDto, PracticePricingDto, QuarterlyRebates};
use model::entities::{lens_brand, practice_pricing, practice_quarterly_settings};

pub fn brand_to_dto(brand: &lens_brand::Model) -> BrandDto {
    BrandDto {
        id: brand.id,
        brand_name: brand.brand_name.clone(),
        boxes_per_year: brand.boxes_per_year,
        competitor_price_per_box: brand.competitor_price_per_box,
        competitor_annual_rebate: brand.competitor_annual_rebate,
        competitor_semiannual_rebate: brand.competitor_semiannual_rebate,
        competitor_first_time_discount_percent: brand.competitor_first_time_discount_percent,
        is_active: brand.is_active,
    }
}

pub fn pricing_to_dto(pricing: &practice_pricing::Model) -> PracticePricingDto {
    PracticePricingDto {
        price_per_box: pricing.price_per_box,
        manufacturer_rebate_new: pricing.manufacturer_rebate_new,
        manufacturer_rebate_existing: pricing.manufacturer_rebate_existing,
        is_active: pricing.is_active,
    }
}

pub fn settings_to_rebates(settings: &practice_quarterly_settings::Model) -> QuarterlyRebates {
    QuarterlyRebates {
        new_wearer_rebate_q1: settings.new_wearer_rebate_q1,
        new_wearer_rebate_q2: settings.new_wearer_rebate_q2,
        new_wearer_rebate_q3: settings.new_wearer_rebate_q3,
        new_wearer_rebate_q4: settings.new_wearer_rebate_q4,
        existing_wearer_rebate_q1: settings.existing_wearer_rebate_q1,
        existing_wearer_rebate_q2: settings.existing_wearer_rebate_q2,
        existing_wearer_rebate_q3: settings.existing_wearer_rebate_q3,
        existing_wearer_rebate_q4: settings.existing_wearer_rebate_q4,
    }
}
