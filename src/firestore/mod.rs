pub mod document;
pub mod firestore;
pub mod value;

pub use document::Document;
pub use firestore::Firestore;
