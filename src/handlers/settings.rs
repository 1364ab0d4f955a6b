use crate::auth::AuthPractice;
use crate::error::ApiError;
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, response::Json};
use common::{ApiResponse, QuarterlyRebates};
use compute::convert::settings_to_rebates;
use model::entities::{practice_quarterly_settings, prelude::*};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tracing::{debug, info, instrument, trace, warn};

fn to_active_model(practice_id: i32, rebates: &QuarterlyRebates) -> practice_quarterly_settings::ActiveModel {
    practice_quarterly_settings::ActiveModel {
        practice_id: Set(practice_id),
        new_wearer_rebate_q1: Set(rebates.new_wearer_rebate_q1),
        new_wearer_rebate_q2: Set(rebates.new_wearer_rebate_q2),
        new_wearer_rebate_q3: Set(rebates.new_wearer_rebate_q3),
        new_wearer_rebate_q4: Set(rebates.new_wearer_rebate_q4),
        existing_wearer_rebate_q1: Set(rebates.existing_wearer_rebate_q1),
        existing_wearer_rebate_q2: Set(rebates.existing_wearer_rebate_q2),
        existing_wearer_rebate_q3: Set(rebates.existing_wearer_rebate_q3),
        existing_wearer_rebate_q4: Set(rebates.existing_wearer_rebate_q4),
    }
}

/// Quarterly rebate settings of the current practice
#[utoipa::path(
    get,
    path = "/api/v1/practice/settings",
    tag = "practice",
    responses(
        (status = 200, description = "Settings retrieved successfully", body = ApiResponse<QuarterlyRebates>),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims), fields(practice_id = claims.sub))]
pub async fn get_practice_settings(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
) -> Result<Json<ApiResponse<QuarterlyRebates>>, ApiError> {
    trace!("Entering get_practice_settings function");

    let rebates = match PracticeQuarterlySettings::find_by_id(claims.sub)
        .one(&state.db)
        .await?
    {
        Some(row) => settings_to_rebates(&row),
        None => {
            debug!("No settings saved yet, returning zeros");
            QuarterlyRebates::default()
        }
    };

    Ok(Json(ApiResponse {
        data: rebates,
        message: "Settings retrieved successfully".to_string(),
        success: true,
    }))
}

/// Replace the quarterly rebate settings of the current practice
#[utoipa::path(
    put,
    path = "/api/v1/practice/settings",
    tag = "practice",
    request_body = QuarterlyRebates,
    responses(
        (status = 200, description = "Settings saved successfully", body = ApiResponse<QuarterlyRebates>),
        (status = 400, description = "Negative rebate value", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, rebates), fields(practice_id = claims.sub))]
pub async fn update_practice_settings(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
    Json(rebates): Json<QuarterlyRebates>,
) -> Result<Json<ApiResponse<QuarterlyRebates>>, ApiError> {
    trace!("Entering update_practice_settings function");

    let negative = rebates.negative_fields();
    if !negative.is_empty() {
        warn!("Rejected negative rebate values: {:?}", negative);
        return Err(ApiError::Validation(format!(
            "Rebate values must not be negative: {}",
            negative.join(", ")
        )));
    }

    let model = to_active_model(claims.sub, &rebates);
    let exists = PracticeQuarterlySettings::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .is_some();

    let saved = if exists {
        model.update(&state.db).await?
    } else {
        model.insert(&state.db).await?
    };

    info!("Quarterly settings saved for practice {}", claims.sub);
    Ok(Json(ApiResponse {
        data: settings_to_rebates(&saved),
        message: "Settings saved successfully".to_string(),
        success: true,
    }))
}
