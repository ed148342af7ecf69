//! Firestore REST v1 client
//!
//! Implements [`DocumentStore`] against
//! `https://firestore.googleapis.com/v1`. The store is constructed
//! explicitly by the caller and owned for the duration of a run; OAuth2
//! service-account tokens are fetched per call and requests run
//! sequentially, one document at a time, with no retry.

mod value;

use crate::error::StoreError;
use crate::store::DocumentStore;
use crate::types::{CollectionPath, Document, DocumentPath};
use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper_rustls::HttpsConnector;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{AccessToken, ServiceAccountAuthenticator, ServiceAccountKey};

const BASE_URL: &str = "https://firestore.googleapis.com/v1";
const SCOPES: &[&str] = &["https://www.googleapis.com/auth/datastore"];
const PAGE_SIZE: u32 = 300;

type ServiceAuthenticator = Authenticator<HttpsConnector<HttpConnector>>;

/// Firestore-backed document store
pub struct FirestoreStore {
    http: reqwest::Client,
    auth: ServiceAuthenticator,
    project_id: String,
    database_id: String,
}

impl FirestoreStore {
    /// Database id Firestore uses when a project has only the default one
    pub const DEFAULT_DATABASE: &'static str = "(default)";

    /// Connect with a service-account key
    ///
    /// Builds the OAuth2 authenticator; the credential itself is first
    /// exercised on the initial remote call.
    ///
    /// # Errors
    /// Returns [`StoreError::Config`] if the key carries no project id and
    /// [`StoreError::Io`] if the authenticator cannot be built from it.
    pub async fn connect(
        key: ServiceAccountKey,
        database_id: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let project_id = key
            .project_id
            .clone()
            .ok_or(StoreError::Config("service-account key has no project id"))?;
        let auth = ServiceAccountAuthenticator::builder(key).build().await?;
        Ok(Self {
            http: reqwest::Client::new(),
            auth,
            project_id,
            database_id: database_id.into(),
        })
    }

    /// Project id the store is bound to
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Database id the store is bound to
    #[inline]
    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    fn root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database_id
        )
    }

    async fn bearer(&self) -> Result<AccessToken, StoreError> {
        Ok(self.auth.token(SCOPES).await?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<RestDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListCollectionIdsResponse {
    #[serde(default)]
    collection_ids: Vec<String>,
    next_page_token: Option<String>,
}

/// Document path relative to the database root resource name
fn relative_document_path(root: &str, name: &str) -> Result<DocumentPath, StoreError> {
    let prefix = format!("{root}/");
    let relative = name
        .strip_prefix(&prefix)
        .ok_or_else(|| StoreError::decode(format!("unexpected document name: {name}")))?;
    DocumentPath::parse(relative)
}

/// Turn a non-success response into a [`StoreError::Api`]
///
/// Google error payloads carry the human-readable text under
/// `error.message`; fall back to the raw body otherwise.
async fn into_api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|payload| {
            payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body);
    StoreError::Api { status, message }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<Document>, StoreError> {
        let token = self.bearer().await?;
        let root = self.root();
        let url = format!("{BASE_URL}/{root}/{}", collection.as_str());

        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .http
                .get(&url)
                .bearer_auth(token.token().unwrap_or_default())
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(ref next) = page_token {
                request = request.query(&[("pageToken", next.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(into_api_error(response).await);
            }

            let page: ListDocumentsResponse = response.json().await?;
            for doc in page.documents {
                documents.push(Document {
                    path: relative_document_path(&root, &doc.name)?,
                    fields: value::decode_fields(&doc.fields)?,
                });
            }
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        tracing::debug!(
            collection = collection.as_str(),
            count = documents.len(),
            "listed documents"
        );
        Ok(documents)
    }

    async fn update_fields(
        &self,
        doc: &DocumentPath,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let token = self.bearer().await?;
        let url = format!("{BASE_URL}/{}/{}", self.root(), doc.as_str());

        // updateMask restricts the write to the given keys; the exists
        // precondition keeps this an update rather than an upsert
        let mask: Vec<(&str, &str)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", key.as_str()))
            .collect();
        let body = serde_json::json!({ "fields": value::encode_fields(fields) });

        let response = self
            .http
            .patch(&url)
            .bearer_auth(token.token().unwrap_or_default())
            .query(&mask)
            .query(&[("currentDocument.exists", "true")])
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(doc.as_str().to_string()));
        }
        if !response.status().is_success() {
            return Err(into_api_error(response).await);
        }
        Ok(())
    }

    async fn list_root_collections(&self) -> Result<BTreeSet<String>, StoreError> {
        let token = self.bearer().await?;
        let url = format!("{BASE_URL}/{}:listCollectionIds", self.root());

        let mut ids = BTreeSet::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut body = serde_json::json!({ "pageSize": PAGE_SIZE });
            if let Some(ref next) = page_token {
                body["pageToken"] = Value::String(next.clone());
            }

            let response = self
                .http
                .post(&url)
                .bearer_auth(token.token().unwrap_or_default())
                .json(&body)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(into_api_error(response).await);
            }

            let page: ListCollectionIdsResponse = response.json().await?;
            ids.extend(page.collection_ids);
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: &str = "projects/tebs-demo/databases/(default)/documents";

    #[test]
    fn relative_path_strips_root() {
        let name = format!("{ROOT}/2025/p1");
        let path = relative_document_path(ROOT, &name).unwrap();
        assert_eq!(path.as_str(), "2025/p1");
    }

    #[test]
    fn relative_path_rejects_foreign_name() {
        let name = "projects/other/databases/(default)/documents/2025/p1";
        assert!(relative_document_path(ROOT, name).is_err());
    }

    #[test]
    fn parses_list_documents_response() {
        let payload = json!({
            "documents": [
                {
                    "name": format!("{ROOT}/2025/p1"),
                    "fields": { "subsidiary": { "stringValue": "ERL" } },
                    "createTime": "2025-01-01T00:00:00Z",
                    "updateTime": "2025-06-01T00:00:00Z",
                }
            ],
            "nextPageToken": "abc",
        });
        let parsed: ListDocumentsResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(parsed.documents.len(), 1);
        assert_eq!(parsed.next_page_token.as_deref(), Some("abc"));
        assert!(parsed.documents[0].fields.contains_key("subsidiary"));
    }

    #[test]
    fn parses_empty_list_documents_response() {
        let parsed: ListDocumentsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.documents.is_empty());
        assert!(parsed.next_page_token.is_none());
    }

    #[test]
    fn parses_collection_ids_response() {
        let payload = json!({ "collectionIds": ["projects", "2025", "users"] });
        let parsed: ListCollectionIdsResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(parsed.collection_ids, vec!["projects", "2025", "users"]);
    }
}
