//! The application handle: one bound context to a hosted backend instance.

use std::sync::Arc;

use tracing::info;

use crate::config::{EndpointsConfig, FirebaseOptions};
use crate::error::{Error, Result};

/// Name of the only app this crate creates.
pub const DEFAULT_APP_NAME: &str = "[DEFAULT]";

struct AppInner {
    options: FirebaseOptions,
    endpoints: EndpointsConfig,
    http: reqwest::Client,
}

/// Shared handle to the configured backend. Clones point at the same
/// options and HTTP client; the auth and database clients each hold one.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<AppInner>,
}

impl FirebaseApp {
    /// Bind to the backend described by `options`. Purely local: no request
    /// is made until a client is used.
    pub fn new(options: &FirebaseOptions, endpoints: &EndpointsConfig) -> Result<Self> {
        if options.api_key.trim().is_empty() {
            return Err(Error::MissingOption("api_key"));
        }
        if options.project_id.trim().is_empty() {
            return Err(Error::MissingOption("project_id"));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            project_id = options.project_id.as_str(),
            auth_domain = options.auth_domain.as_str(),
            "Initialized app {}",
            DEFAULT_APP_NAME
        );

        Ok(Self {
            inner: Arc::new(AppInner {
                options: options.clone(),
                endpoints: endpoints.clone(),
                http,
            }),
        })
    }

    pub fn name(&self) -> &str {
        DEFAULT_APP_NAME
    }

    pub fn options(&self) -> &FirebaseOptions {
        &self.inner.options
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.inner.endpoints
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// True when both handles refer to the same underlying app.
    pub fn ptr_eq(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &DEFAULT_APP_NAME)
            .field("options", &self.inner.options)
            .finish()
    }
}
