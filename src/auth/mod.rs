pub mod auth;
pub mod credentials;
pub mod user;

// Re-export so we can do "use crate::auth::*;"
pub use auth::Auth;
pub use credentials::{CredentialsProvider, EmptyCredentials};
pub use user::User;
