use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InviteCode {
    pub code: String, // ! unique & 8 chars from the restricted alphabet
    pub created_at: DateTime<Utc>,

    // ? Consumption; set together, exactly once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_by: Option<String>, // ! merchant id
}

impl InviteCode {
    pub fn new(code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            created_at,
            used_at: None,
            used_by: None,
        }
    }

    /// A code is redeemable iff it has never been consumed.
    pub fn redeemable(&self) -> bool {
        self.used_at.is_none()
    }
}
