//! Shared client context.
//!
//! Holds the application handle and the two clients bound to it. Build it
//! once at startup and hand out references; nothing in it is replaced later.

use std::sync::Arc;

use crate::app::FirebaseApp;
use crate::auth::Auth;
use crate::firestore::Firestore;

/// The application handle plus the auth and database clients derived from it.
#[derive(Clone)]
pub struct AppContext {
    /// Binding to the configured backend instance.
    pub app: FirebaseApp,
    /// Authentication client; also supplies the database client's tokens.
    pub auth: Arc<Auth>,
    /// Document-database client.
    pub db: Arc<Firestore>,
}

impl AppContext {
    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn db(&self) -> &Firestore {
        &self.db
    }
}
