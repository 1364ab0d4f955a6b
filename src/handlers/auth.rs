use crate::auth::{hash_password, verify_password, AuthPractice};
use crate::error::ApiError;
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use chrono::Utc;
use common::ApiResponse;
use model::entities::{practice, prelude::*};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering a practice
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Practice display name
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,
    /// Login email (must be unique)
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// Public view of a practice account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PracticeProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// `practice` or `admin`
    pub role: String,
}

impl From<practice::Model> for PracticeProfile {
    fn from(model: practice::Model) -> Self {
        let role = match model.role {
            practice::PracticeRole::Practice => "practice",
            practice::PracticeRole::Admin => "admin",
        };
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: role.to_string(),
        }
    }
}

/// Token plus the account it was issued for
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub practice: PracticeProfile,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Register a new practice
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Practice registered successfully", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid request or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    trace!("Entering register function");

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }
    let email = normalize_email(&request.email);
    debug!("Registering practice '{}'", name);

    let new_practice = practice::ActiveModel {
        name: Set(name),
        email: Set(email.clone()),
        password_hash: Set(hash_password(&request.password)?),
        role: Set(practice::PracticeRole::Practice),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let practice_model = new_practice.insert(&state.db).await.map_err(|db_err| {
        ApiError::from_unique_violation(db_err, "Email already exists".to_string(), "EMAIL_ALREADY_EXISTS")
    })?;

    let token = state.tokens.issue(&practice_model)?;
    info!("Practice registered with ID: {}", practice_model.id);

    let response = ApiResponse {
        data: AuthResponse {
            token,
            practice: PracticeProfile::from(practice_model),
        },
        message: "Practice registered successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<LoginRequest>>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    trace!("Entering login function");

    let email = normalize_email(&request.email);
    let found = Practice::find()
        .filter(practice::Column::Email.eq(email))
        .one(&state.db)
        .await?;

    let practice_model = match found {
        Some(model) if verify_password(&request.password, &model.password_hash) => model,
        _ => {
            warn!("Rejected login attempt");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    let token = state.tokens.issue(&practice_model)?;
    info!("Practice {} logged in", practice_model.id);

    let response = ApiResponse {
        data: AuthResponse {
            token,
            practice: PracticeProfile::from(practice_model),
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Current practice profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "auth",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<PracticeProfile>),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Practice no longer exists", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims), fields(practice_id = claims.sub))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
) -> Result<Json<ApiResponse<PracticeProfile>>, ApiError> {
    trace!("Entering get_profile function");

    let practice_model = Practice::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Practice {} from token not found", claims.sub);
            ApiError::NotFound("Practice not found".to_string())
        })?;

    let response = ApiResponse {
        data: PracticeProfile::from(practice_model),
        message: "Profile retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
