//! Onboarding wizard: the linear state machine that walks a merchant from
//! invite code to published profile, plus the re-entry path that lets a
//! returning merchant authenticate with id + code and edit.
//!
//! Failures never advance the state: the error string is surfaced and the
//! entered form data is kept. Only cancel discards transient fields.

use url::Url;

use crate::invites;
use crate::merchants::{self, MerchantPatch};
use crate::models::merchant::SocialLinks;
use crate::store::KvStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnboardingState {
    #[default]
    EnteringCode,
    CollectingProfile,
    Success,
    AuthenticatingForManage,
    EditingProfile,
    UpdateSuccess,
}

/// Transient form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub merchant_id: String,
    pub shop_url: String,
    pub support_url: String,
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Default)]
pub struct Onboarding {
    state: OnboardingState,
    code: String,
    pub form: ProfileForm,
    pub error: Option<String>,
    /// Set on successful registration: the merchant's public URL.
    pub published_url: Option<String>,
}

impl Onboarding {
    /// Entry point for a new merchant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry point for a returning merchant.
    pub fn manage() -> Self {
        Self {
            state: OnboardingState::AuthenticatingForManage,
            ..Self::default()
        }
    }

    pub fn state(&self) -> OnboardingState {
        self.state
    }

    /// EnteringCode → CollectingProfile on a redeemable code.
    pub async fn submit_code(&mut self, store: &dyn KvStore, code: &str) {
        if self.state != OnboardingState::EnteringCode {
            return;
        }
        match invites::validate(store, code).await {
            Ok(invite) => {
                self.code = invite.code;
                self.error = None;
                self.state = OnboardingState::CollectingProfile;
            }
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// EnteringCode → AuthenticatingForManage ("manage instead").
    pub fn manage_instead(&mut self) {
        if self.state == OnboardingState::EnteringCode {
            self.error = None;
            self.state = OnboardingState::AuthenticatingForManage;
        }
    }

    /// The two explicit back transitions, both landing on EnteringCode.
    pub fn back(&mut self) {
        if matches!(
            self.state,
            OnboardingState::CollectingProfile | OnboardingState::AuthenticatingForManage
        ) {
            self.error = None;
            self.state = OnboardingState::EnteringCode;
        }
    }

    /// CollectingProfile → Success. Pre-validates the form locally, then
    /// runs the availability check and the registration in sequence.
    pub async fn submit_profile(&mut self, store: &dyn KvStore, origin: &str, form: ProfileForm) {
        if self.state != OnboardingState::CollectingProfile {
            return;
        }
        self.form = form;

        if let Err(message) = precheck(&self.form) {
            self.error = Some(message);
            return;
        }

        let result = async {
            merchants::check_availability(store, &self.form.merchant_id).await?;
            merchants::register(
                store,
                &self.code,
                &self.form.merchant_id,
                &self.form.shop_url,
                &self.form.support_url,
                self.form.social_links.clone(),
            )
            .await
        }
        .await;

        match result {
            Ok(merchant) => {
                self.form.merchant_id = merchant.id.clone();
                self.published_url = Some(merchant.public_url(origin));
                self.error = None;
                self.state = OnboardingState::Success;
            }
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// AuthenticatingForManage → EditingProfile, pre-filling the form from
    /// the stored profile.
    pub async fn authenticate(&mut self, store: &dyn KvStore, merchant_id: &str, code: &str) {
        if self.state != OnboardingState::AuthenticatingForManage {
            return;
        }
        match merchants::get(store, merchant_id, code).await {
            Ok(config) => {
                self.code = invites::normalize_code(code);
                self.form = ProfileForm {
                    merchant_id: merchant_id.trim().to_lowercase(),
                    shop_url: config.shop_url,
                    support_url: config.support_url,
                    social_links: config.social_links,
                };
                self.error = None;
                self.state = OnboardingState::EditingProfile;
            }
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// EditingProfile → UpdateSuccess.
    pub async fn save(&mut self, store: &dyn KvStore, form: ProfileForm) {
        if self.state != OnboardingState::EditingProfile {
            return;
        }
        let merchant_id = self.form.merchant_id.clone();
        self.form = form;
        self.form.merchant_id = merchant_id;

        let patch = MerchantPatch {
            shop_url: Some(self.form.shop_url.clone()),
            support_url: Some(self.form.support_url.clone()),
            social_links: self.form.social_links.clone(),
        };
        match merchants::update(store, &self.form.merchant_id, &self.code, patch).await {
            Ok(()) => {
                self.error = None;
                self.state = OnboardingState::UpdateSuccess;
            }
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// Close the wizard; every transient field is dropped.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

/// Client-side checks before any request leaves the form: required fields
/// present, links parse as URLs.
fn precheck(form: &ProfileForm) -> Result<(), String> {
    if form.merchant_id.trim().is_empty() {
        return Err("please enter a merchant id".to_string());
    }
    if form.shop_url.trim().is_empty() {
        return Err("please enter a shop link".to_string());
    }
    if form.support_url.trim().is_empty() {
        return Err("please enter a support link".to_string());
    }
    if Url::parse(&form.shop_url).is_err() || Url::parse(&form.support_url).is_err() {
        return Err("links must be valid urls".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const ORIGIN: &str = "https://landing.example";

    fn form(id: &str) -> ProfileForm {
        ProfileForm {
            merchant_id: id.to_string(),
            shop_url: "https://shop.example".to_string(),
            support_url: "https://support.example".to_string(),
            social_links: None,
        }
    }

    async fn store_with_code() -> (MemoryStore, String) {
        let store = MemoryStore::new();
        let code = invites::generate(&store, 1).await.unwrap().remove(0).code;
        (store, code)
    }

    #[tokio::test]
    async fn happy_path_reaches_success() {
        let (store, code) = store_with_code().await;
        let mut wizard = Onboarding::new();
        assert_eq!(wizard.state(), OnboardingState::EnteringCode);

        wizard.submit_code(&store, &code).await;
        assert_eq!(wizard.state(), OnboardingState::CollectingProfile);
        assert_eq!(wizard.error, None);

        wizard.submit_profile(&store, ORIGIN, form("My_Shop-1")).await;
        assert_eq!(wizard.state(), OnboardingState::Success);
        assert_eq!(
            wizard.published_url.as_deref(),
            Some("https://landing.example/m/my_shop-1")
        );
    }

    #[tokio::test]
    async fn bad_code_keeps_state_and_surfaces_error() {
        let store = MemoryStore::new();
        let mut wizard = Onboarding::new();

        wizard.submit_code(&store, "NOSUCH22").await;
        assert_eq!(wizard.state(), OnboardingState::EnteringCode);
        assert_eq!(wizard.error.as_deref(), Some("invalid invite code"));
    }

    #[tokio::test]
    async fn precheck_failures_keep_the_entered_form() {
        let (store, code) = store_with_code().await;
        let mut wizard = Onboarding::new();
        wizard.submit_code(&store, &code).await;

        let mut bad = form("demo");
        bad.shop_url = "not-a-url".to_string();
        wizard.submit_profile(&store, ORIGIN, bad.clone()).await;

        assert_eq!(wizard.state(), OnboardingState::CollectingProfile);
        assert!(wizard.error.is_some());
        // entered data survives the error
        assert_eq!(wizard.form, bad);
    }

    #[tokio::test]
    async fn taken_id_keeps_state() {
        let (store, code) = store_with_code().await;
        let other = invites::generate(&store, 1).await.unwrap().remove(0).code;
        merchants::register(
            &store,
            &other,
            "demo",
            "https://a.example",
            "https://b.example",
            None,
        )
        .await
        .unwrap();

        let mut wizard = Onboarding::new();
        wizard.submit_code(&store, &code).await;
        wizard.submit_profile(&store, ORIGIN, form("demo")).await;

        assert_eq!(wizard.state(), OnboardingState::CollectingProfile);
        assert_eq!(wizard.error.as_deref(), Some("merchant id already taken"));
    }

    #[tokio::test]
    async fn manage_path_prefills_edits_and_saves() {
        let (store, code) = store_with_code().await;
        merchants::register(
            &store,
            &code,
            "demo",
            "https://a.example",
            "https://b.example",
            None,
        )
        .await
        .unwrap();

        let mut wizard = Onboarding::manage();
        assert_eq!(wizard.state(), OnboardingState::AuthenticatingForManage);

        wizard.authenticate(&store, "Demo", &code.to_lowercase()).await;
        assert_eq!(wizard.state(), OnboardingState::EditingProfile);
        assert_eq!(wizard.form.shop_url, "https://a.example");

        let mut edited = wizard.form.clone();
        edited.shop_url = "https://new.example".to_string();
        wizard.save(&store, edited).await;
        assert_eq!(wizard.state(), OnboardingState::UpdateSuccess);

        let config = merchants::get(&store, "demo", &code).await.unwrap();
        assert_eq!(config.shop_url, "https://new.example");
    }

    #[tokio::test]
    async fn wrong_credentials_keep_authenticating_state() {
        let (store, code) = store_with_code().await;
        merchants::register(
            &store,
            &code,
            "demo",
            "https://a.example",
            "https://b.example",
            None,
        )
        .await
        .unwrap();

        let mut wizard = Onboarding::manage();
        wizard.authenticate(&store, "demo", "WRONGCODE").await;
        assert_eq!(wizard.state(), OnboardingState::AuthenticatingForManage);
        assert_eq!(wizard.error.as_deref(), Some("verification failed"));
    }

    #[tokio::test]
    async fn manage_instead_and_back_transitions() {
        let (store, code) = store_with_code().await;
        let mut wizard = Onboarding::new();

        wizard.manage_instead();
        assert_eq!(wizard.state(), OnboardingState::AuthenticatingForManage);

        wizard.back();
        assert_eq!(wizard.state(), OnboardingState::EnteringCode);

        wizard.submit_code(&store, &code).await;
        assert_eq!(wizard.state(), OnboardingState::CollectingProfile);
        wizard.back();
        assert_eq!(wizard.state(), OnboardingState::EnteringCode);

        // back is not a transition out of terminal or initial states
        wizard.back();
        assert_eq!(wizard.state(), OnboardingState::EnteringCode);
    }

    #[tokio::test]
    async fn cancel_clears_everything() {
        let (store, code) = store_with_code().await;
        let mut wizard = Onboarding::new();
        wizard.submit_code(&store, &code).await;
        wizard.submit_profile(&store, ORIGIN, form("")).await; // precheck error

        wizard.cancel();
        assert_eq!(wizard.state(), OnboardingState::EnteringCode);
        assert_eq!(wizard.form, ProfileForm::default());
        assert_eq!(wizard.error, None);
        assert_eq!(wizard.published_url, None);
    }
}
