//! The backend seam.
//!
//! `MeetingManager` only talks to the backend through `MeetingStore`.
//! `HttpStore` is the real implementation; tests provide in-memory ones.

use async_trait::async_trait;

use crate::error::MeetingResult;
use crate::meeting::{Meeting, MeetingFields, MeetingId};

/// One `list` response.
///
/// Rows that fail to decode are dropped rather than failing the whole
/// load; `skipped` keeps the decode error for each of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub meetings: Vec<Meeting>,
    pub skipped: Vec<String>,
}

/// Remote collection of meetings.
///
/// The store is authoritative: callers never patch their own copy from a
/// create or update response, they list again.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// `GET /api/meetings`
    async fn list(&self) -> MeetingResult<Listing>;

    /// `POST /api/meetings`, returning the id the server assigned.
    async fn create(&self, fields: &MeetingFields) -> MeetingResult<MeetingId>;

    /// `PUT /api/meetings/{id}`
    async fn update(&self, id: &MeetingId, fields: &MeetingFields) -> MeetingResult<()>;

    /// `DELETE /api/meetings/{id}`
    async fn delete(&self, id: &MeetingId) -> MeetingResult<()>;
}
