use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{Error, Result},
    invites,
    merchants::{self, MerchantPatch},
    models::merchant::{MerchantPublicConfig, SocialLinks},
    routes::OkResponse,
    state::AppState,
    utils::extract::Json,
};

pub fn merchant_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/check-id", post(check_id))
        .route("/validate-code", post(validate_code))
        .route("/register", post(register))
        .route("/config", get(get_config))
        .route("/update", post(update_config))
        .with_state(state)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIdRequest {
    #[serde(default)]
    merchant_id: String,
}

pub async fn check_id(
    State(state): State<AppState>,
    Json(input): Json<CheckIdRequest>,
) -> Result<Json<OkResponse>> {
    if input.merchant_id.trim().is_empty() {
        return Err(Error::MissingField("merchantId"));
    }
    merchants::check_availability(state.store.as_ref(), &input.merchant_id).await?;
    Ok(Json(OkResponse::ok()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateCodeRequest {
    #[serde(default)]
    code: String,
}

pub async fn validate_code(
    State(state): State<AppState>,
    Json(input): Json<ValidateCodeRequest>,
) -> Result<Json<OkResponse>> {
    if input.code.trim().is_empty() {
        return Err(Error::MissingField("code"));
    }
    invites::validate(state.store.as_ref(), &input.code).await?;
    Ok(Json(OkResponse::ok()))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    code: String,
    #[serde(default)]
    merchant_id: String,
    #[serde(default)]
    shop_url: String,
    #[serde(default)]
    support_url: String,
    social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    success: bool,
    url: String,
    merchant_id: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let merchant = merchants::register(
        state.store.as_ref(),
        &input.code,
        &input.merchant_id,
        &input.shop_url,
        &input.support_url,
        input.social_links,
    )
    .await?;

    info!("registered merchant {}", merchant.id);
    let url = merchant.public_url(&state.config.public_origin);
    Ok(Json(RegisterResponse {
        success: true,
        url,
        merchant_id: merchant.id,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigQuery {
    #[serde(default)]
    id: String,
    #[serde(default)]
    code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    success: bool,
    config: MerchantPublicConfig,
}

pub async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> Result<Json<ConfigResponse>> {
    if query.id.trim().is_empty() {
        return Err(Error::MissingField("id"));
    }
    if query.code.trim().is_empty() {
        return Err(Error::MissingField("code"));
    }
    let config = merchants::get(state.store.as_ref(), &query.id, &query.code).await?;
    Ok(Json(ConfigResponse {
        success: true,
        config,
    }))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    merchant_id: String,
    #[serde(default)]
    code: String,
    shop_url: Option<String>,
    support_url: Option<String>,
    social_links: Option<SocialLinks>,
}

pub async fn update_config(
    State(state): State<AppState>,
    Json(input): Json<UpdateRequest>,
) -> Result<Json<OkResponse>> {
    if input.merchant_id.trim().is_empty() {
        return Err(Error::MissingField("merchantId"));
    }
    if input.code.trim().is_empty() {
        return Err(Error::MissingField("code"));
    }

    let patch = MerchantPatch {
        shop_url: input.shop_url,
        support_url: input.support_url,
        social_links: input.social_links,
    };
    merchants::update(state.store.as_ref(), &input.merchant_id, &input.code, patch).await?;
    info!("updated merchant {}", input.merchant_id.trim().to_lowercase());
    Ok(Json(OkResponse::ok()))
}
