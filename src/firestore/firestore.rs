use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::document::{collection_path, document_path, Document, RawDocument};
use super::value::encode_fields;
use crate::app::FirebaseApp;
use crate::auth::CredentialsProvider;
use crate::error::{check, Error, Result};

const PAGE_SIZE: &str = "300";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

/// Document-database client bound to one app's default database.
pub struct Firestore {
    app: FirebaseApp,
    credentials: Arc<dyn CredentialsProvider>,
}

impl Firestore {
    /// Local only: nothing is sent until the first read or write.
    pub fn new(app: &FirebaseApp, credentials: Arc<dyn CredentialsProvider>) -> Self {
        info!(
            project_id = app.options().project_id.as_str(),
            "Created database client for app {}",
            app.name()
        );
        Self {
            app: app.clone(),
            credentials,
        }
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    /// `{firestore}/v1/projects/{p}/databases/(default)/documents/{path}`, with
    /// every segment percent-encoded so ids like `a#1` or `what?` stay in the path.
    fn document_url(&self, path: &str) -> Result<Url> {
        let base = &self.app.endpoints().firestore;
        let mut url = Url::parse(base)
            .map_err(|e| Error::InvalidEndpoint(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidEndpoint(base.to_string()))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.app.options().project_id.as_str(),
                "databases",
                "(default)",
                "documents",
            ])
            .extend(path.split('/'));
        Ok(url)
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.document_url(path)?;
        debug!("Sending {} request to: {}", method, url);
        let builder = self.app.http().request(method, url);
        Ok(match self.credentials.access_token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn read_document(response: reqwest::Response) -> Result<Document> {
        let raw: RawDocument = check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Error parsing document: {}", e)))?;
        Document::try_from(raw)
    }

    /// Fetch one document; `NotFound` if it does not exist.
    pub async fn get_document(&self, path: &str) -> Result<Document> {
        let path = document_path(path)?;
        let response = self.request(Method::GET, &path).await?.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(path));
        }
        Self::read_document(response).await
    }

    /// Create or fully replace the document at `path`.
    pub async fn set_document(&self, path: &str, fields: &Map<String, Value>) -> Result<Document> {
        let path = document_path(path)?;
        let response = self
            .request(Method::PATCH, &path)
            .await?
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;
        Self::read_document(response).await
    }

    /// Create a document with a backend-assigned id in `collection`.
    pub async fn add_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<Document> {
        let collection = collection_path(collection)?;
        let response = self
            .request(Method::POST, &collection)
            .await?
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;
        Self::read_document(response).await
    }

    /// Delete the document at `path`. Deleting a missing document succeeds.
    pub async fn delete_document(&self, path: &str) -> Result<()> {
        let path = document_path(path)?;
        let response = self.request(Method::DELETE, &path).await?.send().await?;
        check(response).await?;
        Ok(())
    }

    /// Every document directly under `collection`, following page tokens.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let collection = collection_path(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }
            let response = self
                .request(Method::GET, &collection)
                .await?
                .query(&query)
                .send()
                .await?;
            let page: ListResponse = check(response)
                .await?
                .json()
                .await
                .map_err(|e| Error::Decode(format!("Error parsing document list: {}", e)))?;

            for raw in page.documents {
                documents.push(Document::try_from(raw)?);
            }
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} documents under {}", documents.len(), collection);
        Ok(documents)
    }
}
