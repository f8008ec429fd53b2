//! Document Store (Firestore)
//!
//! Persistence in Google Cloud Firestore through its REST API. Accounts live
//! in `users/{email}`, bookings in `bookings/{bookingId}` and the optional
//! catalog override in `services`.
//!
//! # Architecture
//!
//! - **`auth`** - Service-account token exchange and caching
//! - **`documents`** - Typed-value encoding of records
//!
//! # Module Structure
//!
//! ```text
//! firestore/
//! ├── mod.rs        - FirestoreStore and request plumbing
//! ├── auth.rs       - Access tokens
//! └── documents.rs  - Record <-> document conversion
//! ```
//!
//! # Consistency
//!
//! - Creates pass `documentId`, which the API refuses with `ALREADY_EXISTS`
//!   when the key is taken. A second signup for the same email therefore
//!   fails atomically instead of overwriting the first account.
//! - Deletes read the booking, check the owner, and delete with an
//!   `updateTime` precondition so a concurrent change makes the delete fail
//!   rather than remove something that was not checked.
//! - The owner query has no server-side ordering (that would need a
//!   composite index); results are sorted by schedule after the fetch.

pub mod auth;
pub mod documents;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::backend::storage::error::StoreError;
use crate::backend::storage::StorageBackend;
use crate::shared::{builtin_catalog, Booking, FirebaseConfig, NewUser, ServiceEntry, UserRecord};

use self::auth::{ServiceAccount, ServiceAccountKey, TokenSource};
use self::documents::{
    booking_body, booking_from_document, service_from_document, user_body, user_from_document,
    Document,
};

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

const USERS: &str = "users";
const BOOKINGS: &str = "bookings";
const SERVICES: &str = "services";

/// Connection parameters for `FirestoreStore::new`
#[derive(Debug)]
pub struct FirestoreSettings {
    /// API root, e.g. `https://firestore.googleapis.com/v1`
    pub base_url: String,
    pub project_id: String,
    pub auth: TokenSource,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

/// Firestore-backed store
#[derive(Debug)]
pub struct FirestoreStore {
    http: reqwest::Client,
    documents_url: Url,
    auth: TokenSource,
}

impl FirestoreStore {
    /// Build a store from explicit settings
    pub fn new(settings: FirestoreSettings) -> Result<Self, StoreError> {
        let root = format!(
            "{}/projects/{}/databases/(default)/documents",
            settings.base_url.trim_end_matches('/'),
            settings.project_id
        );
        let documents_url = Url::parse(&root)
            .map_err(|e| StoreError::credentials(format!("invalid Firestore URL {}: {}", root, e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            documents_url,
            auth: settings.auth,
        })
    }

    /// Build a store from configuration
    ///
    /// With an emulator host configured, requests go to the emulator
    /// unauthenticated. Otherwise the service-account key is loaded and its
    /// project used unless `FIREBASE_PROJECT_ID` overrides it.
    pub async fn connect(config: &FirebaseConfig) -> Result<Self, StoreError> {
        let key = match &config.credentials_path {
            Some(path) => Some(ServiceAccountKey::from_file(path).await?),
            None => None,
        };

        let project_id = config
            .project_id
            .clone()
            .or_else(|| key.as_ref().map(|k| k.project_id.clone()))
            .ok_or_else(|| StoreError::credentials("no Firestore project configured"))?;

        let settings = match (&config.emulator_host, key) {
            (Some(host), _) => {
                tracing::info!("Using Firestore emulator at {}", host);
                FirestoreSettings {
                    base_url: format!("http://{}/v1", host),
                    project_id,
                    auth: TokenSource::Anonymous,
                }
            }
            (None, Some(key)) => FirestoreSettings {
                base_url: FIRESTORE_BASE_URL.to_string(),
                project_id,
                auth: TokenSource::ServiceAccount(ServiceAccount::new(key)?),
            },
            (None, None) => return Err(StoreError::credentials("FIREBASE_CREDENTIALS not set")),
        };

        tracing::info!("Firestore store configured for project {}", settings.project_id);
        Self::new(settings)
    }

    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let mut url = self.documents_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::credentials("Firestore URL cannot be a base"))?
            .push(collection);
        Ok(url)
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        let mut url = self.collection_url(collection)?;
        url.path_segments_mut()
            .map_err(|_| StoreError::credentials("Firestore URL cannot be a base"))?
            .push(id);
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, StoreError> {
        let builder = self.http.request(method, url);
        Ok(match self.auth.bearer(&self.http).await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Turn a non-success response into `StoreError::Remote`
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) if !envelope.error.status.is_empty() => {
                format!("{}: {}", envelope.error.status, envelope.error.message)
            }
            Ok(envelope) => envelope.error.message,
            Err(_) => text,
        };
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        // Such ids would address the collection rather than a document.
        if !is_document_id(id) {
            return Ok(None);
        }
        let url = self.document_url(collection, id)?;
        let response = self.request(Method::GET, url).await?.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.json().await?))
    }

    /// Create `collection/id`, failing with `Remote { status: 409 }` if it exists
    async fn create_document(
        &self,
        collection: &str,
        id: &str,
        body: &serde_json::Value,
    ) -> Result<Document, StoreError> {
        let url = self.collection_url(collection)?;
        let response = self
            .request(Method::POST, url)
            .await?
            .query(&[("documentId", id)])
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

fn is_document_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains('/')
}

fn is_conflict(err: &StoreError) -> bool {
    matches!(err, StoreError::Remote { status: 409, .. })
}

impl StorageBackend for FirestoreStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        match self.get_document(USERS, email).await? {
            Some(doc) => Ok(Some(user_from_document(&doc)?)),
            None => Ok(None),
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, StoreError> {
        let created_at = chrono::Utc::now();
        let body = user_body(user, created_at);
        match self.create_document(USERS, &user.email, &body).await {
            Ok(doc) => user_from_document(&doc),
            Err(e) if is_conflict(&e) => Err(StoreError::DuplicateEmail(user.email.clone())),
            Err(e) => Err(e),
        }
    }

    async fn create_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        match self
            .create_document(BOOKINGS, &booking.booking_id, &booking_body(booking))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_conflict(&e) => Err(StoreError::DuplicateBooking(booking.booking_id.clone())),
            Err(e) => Err(e),
        }
    }

    async fn list_bookings_by_user(&self, email: &str) -> Result<Vec<Booking>, StoreError> {
        let url = Url::parse(&format!("{}:runQuery", self.documents_url))
            .map_err(|e| StoreError::credentials(format!("invalid Firestore URL: {}", e)))?;
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": BOOKINGS }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "userEmail" },
                        "op": "EQUAL",
                        "value": { "stringValue": email },
                    }
                },
            }
        });

        let response = self.request(Method::POST, url).await?.json(&query).send().await?;
        let results: Vec<QueryResult> = Self::check(response).await?.json().await?;

        let mut bookings = results
            .iter()
            .filter_map(|result| result.document.as_ref())
            .map(booking_from_document)
            .collect::<Result<Vec<_>, _>>()?;
        bookings.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        Ok(bookings)
    }

    async fn delete_booking(&self, booking_id: &str, owner_email: &str) -> Result<(), StoreError> {
        let doc = self
            .get_document(BOOKINGS, booking_id)
            .await?
            .ok_or(StoreError::NotFound)?;
        let booking = booking_from_document(&doc)?;
        if booking.user_email != owner_email {
            tracing::warn!("Refusing to delete booking {} for non-owner", booking_id);
            return Err(StoreError::NotFound);
        }

        let url = self.document_url(BOOKINGS, booking_id)?;
        let mut request = self.request(Method::DELETE, url).await?;
        if let Some(update_time) = &doc.update_time {
            request = request.query(&[("currentDocument.updateTime", update_time.as_str())]);
        }

        match Self::check(request.send().await?).await {
            Ok(_) => Ok(()),
            // Deleted or changed since the ownership check.
            Err(StoreError::Remote { status: 400 | 404 | 412, .. }) => Err(StoreError::NotFound),
            Err(e) => Err(e),
        }
    }

    async fn list_services(&self) -> Result<Vec<ServiceEntry>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self.request(Method::GET, self.collection_url(SERVICES)?).await?;
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let page: ListResponse = Self::check(request.send().await?).await?.json().await?;
            documents.extend(page.documents);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        if documents.is_empty() {
            tracing::debug!("No services stored remotely, using the built-in catalog");
            return Ok(builtin_catalog());
        }

        let mut services = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| service_from_document(doc, index + 1))
            .collect::<Result<Vec<_>, _>>()?;
        services.sort_by_key(|s| s.id);
        Ok(services)
    }
}
