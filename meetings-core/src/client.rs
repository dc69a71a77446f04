//! HTTP client for the meetings backend.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{MeetingError, MeetingResult};
use crate::meeting::{Meeting, MeetingFields, MeetingId};
use crate::store::{Listing, MeetingStore};

/// `MeetingStore` backed by the `/api/meetings` REST endpoints.
pub struct HttpStore {
    http: reqwest::Client,
    base_url: Url,
}

// Response types matching the backend API

#[derive(Deserialize)]
struct CreatedResponse {
    id: MeetingId,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HttpStore {
    pub fn new(config: &ClientConfig) -> MeetingResult<Self> {
        let base_url = parse_base_url(&config.server_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MeetingError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpStore { http, base_url })
    }

    /// `{base}/api/meetings` or `{base}/api/meetings/{id}`.
    fn endpoint(&self, id: Option<&MeetingId>) -> MeetingResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| MeetingError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["api", "meetings"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl MeetingStore for HttpStore {
    async fn list(&self) -> MeetingResult<Listing> {
        let url = self.endpoint(None)?;
        debug!(%url, "GET meetings");

        let resp = self.http.get(url).send().await?;
        let rows: Vec<Value> = decode(&ensure_success(resp).await?.text().await?)?;
        let listing = decode_rows(rows);

        debug!(
            count = listing.meetings.len(),
            skipped = listing.skipped.len(),
            "loaded meetings"
        );
        Ok(listing)
    }

    async fn create(&self, fields: &MeetingFields) -> MeetingResult<MeetingId> {
        let url = self.endpoint(None)?;
        debug!(%url, title = %fields.title, "POST meeting");

        let resp = self.http.post(url).json(fields).send().await?;
        let created: CreatedResponse = decode(&ensure_success(resp).await?.text().await?)?;

        debug!(id = %created.id, "meeting created");
        Ok(created.id)
    }

    async fn update(&self, id: &MeetingId, fields: &MeetingFields) -> MeetingResult<()> {
        let url = self.endpoint(Some(id))?;
        debug!(%url, "PUT meeting");

        let resp = self.http.put(url).json(fields).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: &MeetingId) -> MeetingResult<()> {
        let url = self.endpoint(Some(id))?;
        debug!(%url, "DELETE meeting");

        let resp = self.http.delete(url).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `MeetingError::Status`, using the
/// backend's `{"error": ...}` body when it sent one.
async fn ensure_success(resp: reqwest::Response) -> MeetingResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => err.error,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };

    Err(MeetingError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Parse a response body, keeping serde's message so the failing field and
/// position end up in the error.
fn decode<T: DeserializeOwned>(body: &str) -> MeetingResult<T> {
    serde_json::from_str(body).map_err(|e| MeetingError::MalformedResponse(e.to_string()))
}

/// Decode each row on its own so one bad row does not hide the rest.
fn decode_rows(rows: Vec<Value>) -> Listing {
    let mut listing = Listing::default();

    for row in rows {
        let id = row.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<Meeting>(row) {
            Ok(meeting) => listing.meetings.push(meeting),
            Err(e) => {
                warn!(%id, error = %e, "skipping unreadable meeting");
                listing.skipped.push(format!("meeting {id}: {e}"));
            }
        }
    }

    listing
}

fn parse_base_url(raw: &str) -> MeetingResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| MeetingError::InvalidUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(MeetingError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}
