//! Invite Code Manager: issuance, listing, deletion, and single-use
//! redemption of admin-issued invite codes.

use chrono::Utc;
use tracing::warn;

use crate::consts::invite_const::{MAX_BATCH, MIN_BATCH};
use crate::consts::store_const::INVITE_PREFIX;
use crate::errors::{Error, Result};
use crate::models::invite::InviteCode;
use crate::store::{KvStore, StoreError};
use crate::utils::codegen::generate_code;

fn invite_key(code: &str) -> String {
    format!("{INVITE_PREFIX}{code}")
}

/// Codes are stored upper-case; input may not be.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Issue `count` fresh codes, clamped to [1, 50]. Each code is claimed with
/// a conditional write and redrawn on collision, so every returned code was
/// unique among stored codes at generation time.
pub async fn generate(store: &dyn KvStore, count: i64) -> Result<Vec<InviteCode>> {
    let count = count.clamp(MIN_BATCH, MAX_BATCH) as usize;
    let now = Utc::now();

    let mut codes = Vec::with_capacity(count);
    for _ in 0..count {
        loop {
            let invite = InviteCode::new(generate_code(), now);
            let key = invite_key(&invite.code);
            match store.put_if_absent(&key, &serde_json::to_string(&invite)?).await {
                Ok(()) => {
                    codes.push(invite);
                    break;
                }
                Err(StoreError::AlreadyExists) => continue,
                Err(error) => return Err(error.into()),
            }
        }
    }

    Ok(codes)
}

/// All stored codes, newest first. Records that fail to deserialize are
/// skipped rather than failing the listing.
pub async fn list(store: &dyn KvStore) -> Result<Vec<InviteCode>> {
    let mut codes: Vec<InviteCode> = Vec::new();
    for raw in store.list_prefix(INVITE_PREFIX).await? {
        match serde_json::from_str(&raw) {
            Ok(invite) => codes.push(invite),
            Err(error) => warn!("skipping malformed invite record: {error}"),
        }
    }

    codes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(codes)
}

/// Unconditional and idempotent: deleting an absent code succeeds.
pub async fn delete(store: &dyn KvStore, code: &str) -> Result<()> {
    store.delete(&invite_key(&normalize_code(code))).await?;
    Ok(())
}

/// Public redeemability check: `InvalidCode` if unknown, `CodeUsed` if
/// already consumed.
pub async fn validate(store: &dyn KvStore, code: &str) -> Result<InviteCode> {
    let raw = store
        .get(&invite_key(&normalize_code(code)))
        .await?
        .ok_or(Error::InvalidCode)?;
    let invite: InviteCode = serde_json::from_str(&raw)?;

    if !invite.redeemable() {
        return Err(Error::CodeUsed);
    }
    Ok(invite)
}

/// Flip a code from redeemable to consumed, recording who consumed it.
/// Compare-and-swap against the record as read, so two racing redemptions
/// cannot both win.
pub async fn consume(store: &dyn KvStore, code: &str, merchant_id: &str) -> Result<InviteCode> {
    let key = invite_key(&normalize_code(code));
    let raw = store.get(&key).await?.ok_or(Error::InvalidCode)?;
    let invite: InviteCode = serde_json::from_str(&raw)?;

    if !invite.redeemable() {
        return Err(Error::CodeUsed);
    }

    let consumed = InviteCode {
        used_at: Some(Utc::now()),
        used_by: Some(merchant_id.to_string()),
        ..invite
    };
    match store
        .compare_and_swap(&key, &raw, &serde_json::to_string(&consumed)?)
        .await
    {
        Ok(()) => Ok(consumed),
        Err(StoreError::Conflict) => Err(Error::CodeUsed),
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn generate_clamps_count() {
        let store = MemoryStore::new();
        assert_eq!(generate(&store, 0).await.unwrap().len(), 1);
        assert_eq!(generate(&store, -3).await.unwrap().len(), 1);
        assert_eq!(generate(&store, 1000).await.unwrap().len(), 50);
        assert_eq!(generate(&store, 5).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn generated_codes_are_unique_and_listed_newest_first() {
        let store = MemoryStore::new();
        let first = generate(&store, 1).await.unwrap().remove(0);
        let second = generate(&store, 1).await.unwrap().remove(0);
        let third = generate(&store, 1).await.unwrap().remove(0);
        assert_ne!(first.code, second.code);

        let listed = list(&store).await.unwrap();
        let codes: Vec<&str> = listed.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec![&third.code, &second.code, &first.code]);
    }

    #[tokio::test]
    async fn validate_distinguishes_unknown_from_used() {
        let store = MemoryStore::new();
        let invite = generate(&store, 1).await.unwrap().remove(0);

        assert!(matches!(
            validate(&store, "NOSUCH22").await,
            Err(Error::InvalidCode)
        ));
        assert!(validate(&store, &invite.code).await.is_ok());
        // case-insensitive on input
        assert!(validate(&store, &invite.code.to_lowercase()).await.is_ok());

        consume(&store, &invite.code, "demo").await.unwrap();
        assert!(matches!(
            validate(&store, &invite.code).await,
            Err(Error::CodeUsed)
        ));
    }

    #[tokio::test]
    async fn consume_is_single_use() {
        let store = MemoryStore::new();
        let invite = generate(&store, 1).await.unwrap().remove(0);

        let consumed = consume(&store, &invite.code, "demo").await.unwrap();
        assert_eq!(consumed.used_by.as_deref(), Some("demo"));
        assert!(consumed.used_at.is_some());

        assert!(matches!(
            consume(&store, &invite.code, "other").await,
            Err(Error::CodeUsed)
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let invite = generate(&store, 1).await.unwrap().remove(0);

        delete(&store, &invite.code).await.unwrap();
        delete(&store, &invite.code).await.unwrap();
        delete(&store, "NEVERWAS").await.unwrap();
        assert!(list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_skips_malformed_records() {
        let store = MemoryStore::new();
        generate(&store, 2).await.unwrap();
        store.put("invite:BROKEN22", "{not json").await.unwrap();

        assert_eq!(list(&store).await.unwrap().len(), 2);
    }
}
