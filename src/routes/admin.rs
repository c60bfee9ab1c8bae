use axum::{
    Router,
    extract::State,
    middleware,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{Error, Result},
    invites, merchants,
    middleware::admin_auth_middleware,
    models::{invite::InviteCode, merchant::MerchantConfig},
    routes::OkResponse,
    state::AppState,
    utils::extract::Json,
};

pub fn admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/invite-codes",
            get(list_invite_codes)
                .post(generate_invite_codes)
                .delete(delete_invite_code),
        )
        .route("/merchants", get(list_merchants).delete(delete_merchant))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Clone, Serialize)]
pub struct CodesResponse {
    success: bool,
    codes: Vec<InviteCode>,
}

pub async fn list_invite_codes(State(state): State<AppState>) -> Result<Json<CodesResponse>> {
    let codes = invites::list(state.store.as_ref()).await?;
    Ok(Json(CodesResponse {
        success: true,
        codes,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateCodesRequest {
    #[serde(default = "default_count")]
    count: i64,
}

fn default_count() -> i64 {
    1
}

pub async fn generate_invite_codes(
    State(state): State<AppState>,
    body: Option<Json<GenerateCodesRequest>>,
) -> Result<Json<CodesResponse>> {
    let count = body.map(|Json(input)| input.count).unwrap_or(1);
    let codes = invites::generate(state.store.as_ref(), count).await?;
    info!("generated {} invite code(s)", codes.len());
    Ok(Json(CodesResponse {
        success: true,
        codes,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCodeRequest {
    #[serde(default)]
    code: String,
}

pub async fn delete_invite_code(
    State(state): State<AppState>,
    Json(input): Json<DeleteCodeRequest>,
) -> Result<Json<OkResponse>> {
    if input.code.trim().is_empty() {
        return Err(Error::MissingField("code"));
    }
    invites::delete(state.store.as_ref(), &input.code).await?;
    info!("deleted invite code {}", invites::normalize_code(&input.code));
    Ok(Json(OkResponse::ok()))
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantsResponse {
    success: bool,
    merchants: Vec<MerchantConfig>,
}

pub async fn list_merchants(State(state): State<AppState>) -> Result<Json<MerchantsResponse>> {
    let merchants = merchants::list(state.store.as_ref()).await?;
    Ok(Json(MerchantsResponse {
        success: true,
        merchants,
    }))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMerchantRequest {
    #[serde(default)]
    merchant_id: String,
}

pub async fn delete_merchant(
    State(state): State<AppState>,
    Json(input): Json<DeleteMerchantRequest>,
) -> Result<Json<OkResponse>> {
    if input.merchant_id.trim().is_empty() {
        return Err(Error::MissingField("merchantId"));
    }
    merchants::delete(state.store.as_ref(), &input.merchant_id).await?;
    info!("deleted merchant {}", input.merchant_id.trim().to_lowercase());
    Ok(Json(OkResponse::ok()))
}
