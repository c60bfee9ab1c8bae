use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MerchantConfig {
    pub id: String, // ! unique & lower-cased & matches ^[a-z0-9_-]{3,20}$
    pub shop_url: String,
    pub support_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,

    // ? founding code; doubles as the update credential
    pub invite_code: String,
    // ? never written by any current path; kept off every public view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_ip: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a merchant sees about itself; internal bookkeeping stays out.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPublicConfig {
    pub shop_url: String,
    pub support_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl MerchantConfig {
    pub fn into_public(self) -> MerchantPublicConfig {
        MerchantPublicConfig {
            shop_url: self.shop_url,
            support_url: self.support_url,
            social_links: self.social_links,
        }
    }

    /// The public URL a registered merchant is reachable at.
    pub fn public_url(&self, origin: &str) -> String {
        format!("{}/m/{}", origin.trim_end_matches('/'), self.id)
    }
}
