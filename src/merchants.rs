//! Merchant Registry: identifier claiming, credentialed self-service reads
//! and updates, and admin listing/deletion.

use chrono::Utc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::consts::store_const::MERCHANT_PREFIX;
use crate::errors::{Error, Result};
use crate::invites;
use crate::models::merchant::{MerchantConfig, MerchantPublicConfig, SocialLinks};
use crate::store::{KvStore, StoreError};
use crate::utils::validate::{normalize_merchant_id, validate_url};

fn merchant_key(id: &str) -> String {
    format!("{MERCHANT_PREFIX}{id}")
}

/// A partial update; `None` (or an empty string) leaves the stored value
/// untouched. A provided `social_links` replaces the sub-record wholesale.
#[derive(Debug, Clone, Default)]
pub struct MerchantPatch {
    pub shop_url: Option<String>,
    pub support_url: Option<String>,
    pub social_links: Option<SocialLinks>,
}

/// Format-check and normalize a candidate id, then check it is unclaimed.
/// Returns the storage form of the id.
pub async fn check_availability(store: &dyn KvStore, candidate: &str) -> Result<String> {
    let id = normalize_merchant_id(candidate)?;
    if store.get(&merchant_key(&id)).await?.is_some() {
        return Err(Error::MerchantIdTaken);
    }
    Ok(id)
}

/// Redeem an invite code and claim a merchant id in one composite step.
///
/// All validation happens before any write. The id is claimed with a
/// conditional write; the founding code is then consumed with a
/// compare-and-swap, and losing that race rolls the claim back.
pub async fn register(
    store: &dyn KvStore,
    code: &str,
    candidate_id: &str,
    shop_url: &str,
    support_url: &str,
    social_links: Option<SocialLinks>,
) -> Result<MerchantConfig> {
    let invite = invites::validate(store, code).await?;
    // availability pre-check; the conditional write below stays authoritative
    let id = check_availability(store, candidate_id).await?;
    validate_url("shopUrl", shop_url)?;
    validate_url("supportUrl", support_url)?;
    if let Some(links) = &social_links {
        validate_social_links(links)?;
    }

    let now = Utc::now();
    let merchant = MerchantConfig {
        id: id.clone(),
        shop_url: shop_url.to_string(),
        support_url: support_url.to_string(),
        social_links,
        invite_code: invite.code.clone(),
        register_ip: None,
        created_at: now,
        updated_at: now,
    };
    match store
        .put_if_absent(&merchant_key(&id), &serde_json::to_string(&merchant)?)
        .await
    {
        Ok(()) => {}
        Err(StoreError::AlreadyExists) => return Err(Error::MerchantIdTaken),
        Err(error) => return Err(error.into()),
    }

    // Consume the founding code. If a racing registration consumed it first,
    // the id claim above must not stand either.
    if let Err(error) = invites::consume(store, &invite.code, &id).await {
        let _ = store.delete(&merchant_key(&id)).await;
        return Err(error);
    }

    Ok(merchant)
}

/// The merchant's own view of its profile, gated by the founding code.
pub async fn get(
    store: &dyn KvStore,
    merchant_id: &str,
    code: &str,
) -> Result<MerchantPublicConfig> {
    let merchant = load(store, &storage_id(merchant_id)).await?;
    check_credential(&merchant.invite_code, code)?;
    Ok(merchant.into_public())
}

/// Apply a patch to an existing profile. The whole patch is validated before
/// anything is written; `updated_at` always advances on success.
pub async fn update(
    store: &dyn KvStore,
    merchant_id: &str,
    code: &str,
    patch: MerchantPatch,
) -> Result<()> {
    let id = storage_id(merchant_id);
    let mut merchant = load(store, &id).await?;
    check_credential(&merchant.invite_code, code)?;

    let shop_url = non_empty(patch.shop_url);
    let support_url = non_empty(patch.support_url);
    if let Some(value) = &shop_url {
        validate_url("shopUrl", value)?;
    }
    if let Some(value) = &support_url {
        validate_url("supportUrl", value)?;
    }
    if let Some(links) = &patch.social_links {
        validate_social_links(links)?;
    }

    if let Some(value) = shop_url {
        merchant.shop_url = value;
    }
    if let Some(value) = support_url {
        merchant.support_url = value;
    }
    if let Some(links) = patch.social_links {
        merchant.social_links = Some(links);
    }
    merchant.updated_at = Utc::now();

    store
        .put(&merchant_key(&id), &serde_json::to_string(&merchant)?)
        .await?;
    Ok(())
}

/// All profiles, newest first; malformed records are skipped.
pub async fn list(store: &dyn KvStore) -> Result<Vec<MerchantConfig>> {
    let mut merchants: Vec<MerchantConfig> = Vec::new();
    for raw in store.list_prefix(MERCHANT_PREFIX).await? {
        match serde_json::from_str(&raw) {
            Ok(merchant) => merchants.push(merchant),
            Err(error) => warn!("skipping malformed merchant record: {error}"),
        }
    }

    merchants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(merchants)
}

/// Unconditional and idempotent.
pub async fn delete(store: &dyn KvStore, merchant_id: &str) -> Result<()> {
    store.delete(&merchant_key(&storage_id(merchant_id))).await?;
    Ok(())
}

fn storage_id(merchant_id: &str) -> String {
    merchant_id.trim().to_lowercase()
}

async fn load(store: &dyn KvStore, id: &str) -> Result<MerchantConfig> {
    let raw = store
        .get(&merchant_key(id))
        .await?
        .ok_or(Error::MerchantNotFound)?;
    Ok(serde_json::from_str(&raw)?)
}

/// The founding invite code is the bearer credential for self-service.
/// Compared in constant time like every other secret here.
fn check_credential(stored: &str, presented: &str) -> Result<()> {
    let presented = invites::normalize_code(presented);
    let matches: bool = stored.as_bytes().ct_eq(presented.as_bytes()).into();
    if !matches {
        return Err(Error::Forbidden);
    }
    Ok(())
}

fn validate_social_links(links: &SocialLinks) -> Result<()> {
    for (field, value) in [
        ("instagram", &links.instagram),
        ("telegram", &links.telegram),
        ("twitter", &links.twitter),
    ] {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                validate_url(field, value)?;
            }
        }
    }
    Ok(())
}

/// Empty or whitespace-only patch values mean "leave unchanged".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
