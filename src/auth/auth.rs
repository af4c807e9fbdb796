use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::credentials::CredentialsProvider;
use super::user::User;
use crate::app::FirebaseApp;
use crate::error::{check, Error, Result};

/// Tokens this close to expiry are refreshed before use.
const REFRESH_MARGIN_MINUTES: i64 = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

/// Body of `accounts:signUp` and `accounts:signInWithPassword`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
}

/// Body of the secure-token refresh call, which uses snake_case.
#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

/// Authentication client bound to one app. Holds the signed-in user, if any.
pub struct Auth {
    app: FirebaseApp,
    current_user: RwLock<Option<User>>,
}

impl Auth {
    /// Local only: nothing is sent until a sign-in or token call.
    pub fn new(app: &FirebaseApp) -> Self {
        info!(
            project_id = app.options().project_id.as_str(),
            "Created auth client for app {}",
            app.name()
        );
        Self {
            app: app.clone(),
            current_user: RwLock::new(None),
        }
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    fn accounts_url(&self, method: &str) -> String {
        format!("{}/v1/accounts:{}", self.app.endpoints().identity_toolkit, method)
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<User> {
        let url = self.accounts_url(method);
        debug!("Sending {} request to: {}", method, url);

        let response = self
            .app
            .http()
            .post(&url)
            .query(&[("key", self.app.options().api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;
        let body: SignInResponse = check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Error parsing {} response: {}", method, e)))?;

        let user = User::from_tokens(body.id_token, body.refresh_token)?;
        *self.current_user.write().await = Some(user.clone());
        info!(uid = user.uid.as_str(), "Signed in via {}", method);
        Ok(user)
    }

    /// Create an account and sign it in.
    pub async fn create_user_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User> {
        self.password_call("signUp", email, password).await
    }

    /// Sign in an existing account. Replaces any current user.
    pub async fn sign_in_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User> {
        self.password_call("signInWithPassword", email, password).await
    }

    pub async fn send_password_reset_email(&self, email: &str) -> Result<()> {
        let url = self.accounts_url("sendOobCode");
        debug!("Requesting password reset email via: {}", url);

        let response = self
            .app
            .http()
            .post(&url)
            .query(&[("key", self.app.options().api_key.as_str())])
            .json(&OobCodeRequest {
                request_type: "PASSWORD_RESET",
                email,
            })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current_user.read().await.clone()
    }

    pub async fn sign_out(&self) {
        if let Some(user) = self.current_user.write().await.take() {
            info!(uid = user.uid.as_str(), "Signed out");
        }
    }

    /// The current user's ID token, refreshed first when `force_refresh` is
    /// set or the cached one is about to expire.
    pub async fn get_id_token(&self, force_refresh: bool) -> Result<String> {
        let user = self.current_user().await.ok_or(Error::NotSignedIn)?;
        if !force_refresh && !user.expires_within(Duration::minutes(REFRESH_MARGIN_MINUTES)) {
            return Ok(user.id_token);
        }

        let refreshed = self.refresh(&user.refresh_token).await?;
        let mut slot = self.current_user.write().await;
        // Only store it if the same user is still signed in.
        if slot.as_ref().map(|u| u.uid.as_str()) == Some(refreshed.uid.as_str()) {
            *slot = Some(refreshed.clone());
        }
        Ok(refreshed.id_token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<User> {
        let url = format!("{}/v1/token", self.app.endpoints().secure_token);
        debug!("Refreshing ID token via: {}", url);

        let response = self
            .app
            .http()
            .post(&url)
            .query(&[("key", self.app.options().api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;
        let body: RefreshResponse = check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Error parsing token refresh response: {}", e)))?;

        User::from_tokens(body.id_token, body.refresh_token)
    }
}

#[async_trait]
impl CredentialsProvider for Auth {
    async fn access_token(&self) -> Result<Option<String>> {
        match self.get_id_token(false).await {
            Ok(token) => Ok(Some(token)),
            Err(Error::NotSignedIn) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
