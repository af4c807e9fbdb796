//! Library exports for firebind, shared between the binary and tests.
//!
//! Bind to a hosted backend from a configuration record and get back an
//! application handle with an authentication client and a document-database
//! client attached.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod firestore;
pub mod startup;
pub mod state;
pub mod utils;

pub use app::FirebaseApp;
pub use auth::Auth;
pub use error::{Error, Result};
pub use firestore::Firestore;
pub use state::AppContext;
