use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifiers naming the hosted backend instance and project to bind to.
///
/// Every field comes from configuration or the environment; none are
/// compiled in.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct FirebaseOptions {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl fmt::Debug for FirebaseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseOptions")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Base URLs of the REST services behind each client.
/// Override these to point at an emulator or a mock server.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct EndpointsConfig {
    #[serde(default = "default_identity_toolkit")]
    pub identity_toolkit: String,
    #[serde(default = "default_secure_token")]
    pub secure_token: String,
    #[serde(default = "default_firestore")]
    pub firestore: String,
}

fn default_identity_toolkit() -> String {
    "https://identitytoolkit.googleapis.com".to_string()
}

fn default_secure_token() -> String {
    "https://securetoken.googleapis.com".to_string()
}

fn default_firestore() -> String {
    "https://firestore.googleapis.com".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            identity_toolkit: default_identity_toolkit(),
            secure_token: default_secure_token(),
            firestore: default_firestore(),
        }
    }
}

impl EndpointsConfig {
    /// Every service served from one base URL, as the local emulator suite
    /// and mock servers do.
    pub fn single(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            identity_toolkit: base.clone(),
            secure_token: base.clone(),
            firestore: base,
        }
    }
}
