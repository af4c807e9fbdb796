#![allow(dead_code)]

use chrono::Utc;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use firebind::config::{load_config_from, ConfigV1};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
firebase:
  api_key: "test-key"
  auth_domain: "vote-app-test.firebaseapp.com"
  project_id: "vote-app-test"
  storage_bucket: "vote-app-test.firebasestorage.app"
  messaging_sender_id: "100000000001"
  app_id: "1:100000000001:web:0123456789abcdef"
logging:
  level: "debug"
  format: "json"
"#;

/// The test config with every endpoint pointed at `base`.
pub fn load_test_config(base: &str) -> ConfigV1 {
    let endpoints = format!(
        "endpoints:\n  identity_toolkit: \"{base}\"\n  secure_token: \"{base}\"\n  firestore: \"{base}\"\n"
    );
    load_config_from(
        Figment::new()
            .merge(Yaml::string(TEST_CONFIG))
            .merge(Yaml::string(&endpoints)),
    )
    .expect("Failed to parse test config YAML")
}

/// An ID token the clients can read claims from.
pub fn id_token(uid: &str, email: &str) -> String {
    let claims = json!({
        "iss": "https://securetoken.google.com/vote-app-test",
        "aud": "vote-app-test",
        "user_id": uid,
        "sub": uid,
        "email": email,
        "exp": Utc::now().timestamp() + 3600,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test"))
        .expect("failed to mint test token")
}
