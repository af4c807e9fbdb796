//! Client bootstrap.
//!
//! Turns the configuration record into an application handle and the two
//! clients bound to it, in one straight-line pass with no network I/O.
//! `init` additionally installs the result process-wide so that every later
//! caller sees the same instance.

use std::sync::{Arc, Mutex, OnceLock};

use tracing::info;

use crate::app::FirebaseApp;
use crate::auth::{Auth, CredentialsProvider};
use crate::config::{ConfigV1, EndpointsConfig, FirebaseOptions};
use crate::error::Result;
use crate::firestore::Firestore;
use crate::state::AppContext;

static CONTEXT: OnceLock<AppContext> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Build the app handle, then the auth client, then the database client.
/// Fails only if the options are rejected by the app handle.
pub fn bootstrap(options: &FirebaseOptions, endpoints: &EndpointsConfig) -> Result<AppContext> {
    let app = FirebaseApp::new(options, endpoints)?;
    let auth = Arc::new(Auth::new(&app));
    let credentials: Arc<dyn CredentialsProvider> = auth.clone();
    let db = Arc::new(Firestore::new(&app, credentials));

    info!(
        project_id = options.project_id.as_str(),
        app_id = options.app_id.as_str(),
        "Client context ready"
    );
    Ok(AppContext { app, auth, db })
}

/// Bootstrap from `config` and install the context for the whole process.
///
/// Only the first successful call constructs anything; later calls return
/// the installed context and ignore their argument.
pub fn init(config: &ConfigV1) -> Result<&'static AppContext> {
    if let Some(ctx) = CONTEXT.get() {
        return Ok(ctx);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(ctx) = CONTEXT.get() {
        return Ok(ctx);
    }
    let ctx = bootstrap(&config.firebase, &config.endpoints)?;
    Ok(CONTEXT.get_or_init(|| ctx))
}

/// The installed context, if `init` has succeeded.
pub fn context() -> Option<&'static AppContext> {
    CONTEXT.get()
}
