//! Core types for the meetings client.
//!
//! This crate provides everything the `meetings` CLI needs apart from
//! terminal rendering:
//! - `Meeting` and related wire types
//! - `Draft`, the form buffer, and `TypeFilter`
//! - `MeetingStore`, the backend trait, with the `HttpStore` REST client
//! - `MeetingManager`, the view state that ties them together

pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod filter;
pub mod meeting;
pub mod store;
pub mod view;

pub use client::HttpStore;
pub use config::ClientConfig;
pub use draft::{Draft, DraftField};
pub use error::{MeetingError, MeetingResult};
pub use filter::TypeFilter;
pub use meeting::{Meeting, MeetingFields, MeetingId, MeetingType};
pub use store::{Listing, MeetingStore};
pub use view::{Action, MeetingManager, Notice, Submitted};
